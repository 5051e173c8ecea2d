//! Integration tests for the edaparts CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get an edaparts command isolated from the caller's environment
fn edaparts() -> Command {
    let mut cmd = Command::cargo_bin("edaparts").unwrap();
    for var in [
        "EDAPARTS_DATABASE",
        "EDAPARTS_FOOTPRINT_SLOTS",
        "EDAPARTS_BUSY_TIMEOUT_MS",
        "EDAPARTS_FORMAT",
        "EDAPARTS_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Helper to create a test project in a temp directory
fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    edaparts().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Run a quiet command that prints a new id, and return it
fn create(tmp: &TempDir, args: &[&str]) -> String {
    let output = edaparts()
        .current_dir(tmp.path())
        .arg("-q")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn add_resistor(tmp: &TempDir, mpn: &str) -> String {
    create(
        tmp,
        &[
            "cmp",
            "add",
            "resistor",
            "--mpn",
            mpn,
            "--manufacturer",
            "Yageo",
            "--value",
            "10k",
            "--package",
            "1206 (3216 Metric)",
            "--comment-kicad",
            "10k 1%",
            "--comment-altium",
            "=Value",
            "--attr",
            "tolerance=1%",
            "--attr",
            "power_max=0.25W",
        ],
    )
}

fn add_footprint(tmp: &TempDir, cad: &str, alias: &str, reference: &str) -> String {
    create(tmp, &["fp", "add", "--cad", cad, "--alias", alias, reference])
}

fn add_symbol(tmp: &TempDir, cad: &str, alias: &str, reference: &str) -> String {
    create(tmp, &["sym", "add", "--cad", cad, "--alias", alias, reference])
}

fn stdout_of(tmp: &TempDir, args: &[&str]) -> String {
    let output = edaparts().current_dir(tmp.path()).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    edaparts()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Electronic component catalog"))
        .stdout(predicate::str::contains("view"));
}

#[test]
fn test_version_displays() {
    edaparts()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edaparts"));
}

#[test]
fn test_completions_bash() {
    edaparts()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("edaparts"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_catalog() {
    let tmp = TempDir::new().unwrap();

    edaparts()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized edaparts project"));

    assert!(tmp.path().join(".edaparts/config.yaml").exists());
    assert!(tmp.path().join(".edaparts/catalog.db").exists());
}

#[test]
fn test_init_twice_reports_existing_project() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = TempDir::new().unwrap();

    edaparts()
        .current_dir(tmp.path())
        .args(["cmp", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an edaparts project"));
}

#[test]
fn test_project_flag_locates_catalog() {
    let tmp = setup_test_project();
    let elsewhere = TempDir::new().unwrap();

    edaparts()
        .current_dir(elsewhere.path())
        .args(["--project"])
        .arg(tmp.path())
        .args(["db", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog Status"));
}

// ============================================================================
// Component Tests
// ============================================================================

#[test]
fn test_cmp_add_and_show() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    assert_eq!(id, "1");

    let json = stdout_of(&tmp, &["cmp", "show", &id, "-f", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["mpn"], "RC1206FR-0710KL");
    assert_eq!(parsed["attributes"]["type"], "resistor");
    assert_eq!(parsed["attributes"]["tolerance"], "1%");
}

#[test]
fn test_cmp_add_duplicate_fails() {
    let tmp = setup_test_project();
    add_resistor(&tmp, "RC1206FR-0710KL");

    edaparts()
        .current_dir(tmp.path())
        .args([
            "cmp",
            "add",
            "resistor",
            "--mpn",
            "RC1206FR-0710KL",
            "--manufacturer",
            "Yageo",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_cmp_add_unknown_attribute_fails() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .args([
            "cmp",
            "add",
            "resistor",
            "--mpn",
            "X1",
            "--manufacturer",
            "Yageo",
            "--attr",
            "voltage=50V",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("voltage"));
}

#[test]
fn test_cmp_add_unknown_kind_fails() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .args(["cmp", "add", "inductor", "--mpn", "L1", "--manufacturer", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown component kind"));
}

#[test]
fn test_cmp_set_updates_fields_and_attributes() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");

    edaparts()
        .current_dir(tmp.path())
        .args([
            "cmp",
            "set",
            &id,
            "--description",
            "Thick film",
            "--attr",
            "tolerance=5%",
            "--value",
            "",
        ])
        .assert()
        .success();

    let json = stdout_of(&tmp, &["cmp", "show", &id, "-f", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["description"], "Thick film");
    assert_eq!(parsed["attributes"]["tolerance"], "5%");
    assert_eq!(parsed["attributes"]["power_max"], "0.25W");
    assert!(parsed.get("value").is_none());
}

#[test]
fn test_cmp_add_power_inductor() {
    let tmp = setup_test_project();
    let id = create(
        &tmp,
        &[
            "cmp",
            "add",
            "power_inductor",
            "--mpn",
            "XAL4020-222ME",
            "--manufacturer",
            "Coilcraft",
            "--attr",
            "current_saturation=5.6A",
        ],
    );

    let json = stdout_of(&tmp, &["cmp", "show", &id, "-f", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["attributes"]["type"], "power_inductor");
    assert_eq!(parsed["attributes"]["current_saturation"], "5.6A");
}

#[test]
fn test_cmp_set_cannot_rename_component() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");

    edaparts()
        .current_dir(tmp.path())
        .args(["cmp", "set", &id, "--mpn", "R-RENAMED"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mpn"));

    let json = stdout_of(&tmp, &["cmp", "show", &id, "-f", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["mpn"], "RC1206FR-0710KL");
    assert_eq!(parsed["manufacturer"], "Yageo");
}

#[test]
fn test_cmp_list_filters_by_kind() {
    let tmp = setup_test_project();
    add_resistor(&tmp, "R-A");
    add_resistor(&tmp, "R-B");
    create(
        &tmp,
        &[
            "cmp",
            "add",
            "led_indicator",
            "--mpn",
            "LED-1",
            "--manufacturer",
            "Kingbright",
            "--attr",
            "color=Red",
        ],
    );

    let ids = stdout_of(&tmp, &["cmp", "list", "--kind", "resistor", "-f", "id"]);
    assert_eq!(ids, "2\n1\n");

    let count = stdout_of(&tmp, &["cmp", "list", "--count"]);
    assert_eq!(count.trim(), "3");
}

#[test]
fn test_cmp_rm_removes_component() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");

    edaparts()
        .current_dir(tmp.path())
        .args(["cmp", "rm", &id])
        .assert()
        .success();

    edaparts()
        .current_dir(tmp.path())
        .args(["cmp", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Library View Tests
// ============================================================================

#[test]
fn test_view_show_pivots_footprints_and_symbol() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    let f1 = add_footprint(&tmp, "kicad", "a", "b");
    let f2 = add_footprint(&tmp, "kicad", "c", "d");
    let s1 = add_symbol(&tmp, "kicad", "Device", "R");

    edaparts()
        .current_dir(tmp.path())
        .args(["fp", "attach", &id, &f1, &f2])
        .assert()
        .success();
    edaparts()
        .current_dir(tmp.path())
        .args(["sym", "attach", &id, &s1])
        .assert()
        .success();

    let csv = stdout_of(&tmp, &["view", "show", "KiCad Resistors", "-f", "csv"]);
    let mut lines = csv.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Part Number,Value,Manufacturer"));
    assert!(header.ends_with("Symbol,Footprints,Tolerance,Power Max"));

    let row = lines.next().unwrap();
    assert!(row.starts_with("RC1206FR-0710KL,10k,Yageo"));
    assert!(row.contains("10k 1%"));
    assert!(row.contains("Device:R,a:b;c:d,1%,0.25W"));
    assert!(lines.next().is_none());
}

#[test]
fn test_view_show_altium_uses_bare_references() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    let fp = add_footprint(&tmp, "altium", "lib", "RESC3216X65");
    let kicad_fp = add_footprint(&tmp, "kicad", "a", "b");
    let sym = add_symbol(&tmp, "altium", "lib", "RES");

    edaparts()
        .current_dir(tmp.path())
        .args(["fp", "attach", &id, &fp, &kicad_fp])
        .assert()
        .success();
    edaparts()
        .current_dir(tmp.path())
        .args(["sym", "attach", &id, &sym])
        .assert()
        .success();

    let json = stdout_of(&tmp, &["view", "show", "Altium Resistors", "-f", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["Footprints"], "RESC3216X65");
    assert_eq!(parsed[0]["Symbol"], "RES");
    assert_eq!(parsed[0]["Comment"], "=Value");
}

#[test]
fn test_view_show_warns_on_truncated_footprints() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    let mut args = vec!["fp".to_string(), "attach".to_string(), id.clone()];
    for n in 0..5 {
        args.push(add_footprint(&tmp, "kicad", "lib", &format!("fp{}", n)));
    }
    edaparts()
        .current_dir(tmp.path())
        .args(&args)
        .assert()
        .success();

    edaparts()
        .current_dir(tmp.path())
        .args(["view", "show", "KiCad Resistors", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "lib:fp0;lib:fp1;lib:fp2;lib:fp3",
        ))
        .stdout(predicate::str::contains("lib:fp4").not())
        .stderr(predicate::str::contains("5 footprints, 1 not shown"));
}

#[test]
fn test_view_show_unknown_view_fails() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .args(["view", "show", "KiCad Inductors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_view_list_names_every_view() {
    edaparts()
        .args(["view", "list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KiCad Resistors 1210"))
        .stdout(predicate::str::contains("Altium Transformers"));
}

#[test]
fn test_materialized_view_is_queryable() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    let f1 = add_footprint(&tmp, "kicad", "a", "b");
    let f2 = add_footprint(&tmp, "kicad", "c", "d");
    edaparts()
        .current_dir(tmp.path())
        .args(["fp", "attach", &id, &f1, &f2])
        .assert()
        .success();

    edaparts()
        .current_dir(tmp.path())
        .args(["view", "materialize"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"));

    let csv = stdout_of(
        &tmp,
        &[
            "db",
            "query",
            "SELECT \"Part Number\", Symbol, Footprints FROM \"KiCad Resistors\"",
            "-f",
            "csv",
        ],
    );
    assert_eq!(csv, "Part Number,Symbol,Footprints\nRC1206FR-0710KL,,a:b;c:d\n");
}

#[test]
fn test_materialize_drop_removes_views() {
    let tmp = setup_test_project();
    edaparts()
        .current_dir(tmp.path())
        .args(["view", "materialize"])
        .assert()
        .success();
    edaparts()
        .current_dir(tmp.path())
        .args(["view", "materialize", "--drop"])
        .assert()
        .success();

    let count = stdout_of(
        &tmp,
        &[
            "db",
            "query",
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'view'",
            "-f",
            "csv",
        ],
    );
    assert_eq!(count, "n\n0\n");
}

#[test]
fn test_db_query_rejects_writes() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .args(["db", "query", "DELETE FROM component"])
        .assert()
        .failure();
}

// ============================================================================
// KiCad Tests
// ============================================================================

#[test]
fn test_kicad_categories() {
    let tmp = setup_test_project();
    let json = stdout_of(&tmp, &["kicad", "categories"]);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 24);
    assert!(names.contains(&"Resistor"));
    assert!(names.contains(&"Transistor MOSFET"));
    assert!(names.contains(&"Power Inductor"));
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_kicad_part_requires_symbol() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");

    edaparts()
        .current_dir(tmp.path())
        .args(["kicad", "part", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no associated"));
}

#[test]
fn test_kicad_part_and_parts() {
    let tmp = setup_test_project();
    let id = add_resistor(&tmp, "RC1206FR-0710KL");
    add_resistor(&tmp, "NO-SYMBOL");
    let sym = add_symbol(&tmp, "kicad", "Device", "R");
    let fp = add_footprint(&tmp, "kicad", "Resistor_SMD", "R_1206_3216Metric");
    edaparts()
        .current_dir(tmp.path())
        .args(["sym", "attach", &id, &sym])
        .assert()
        .success();
    edaparts()
        .current_dir(tmp.path())
        .args(["fp", "attach", &id, &fp])
        .assert()
        .success();

    let json = stdout_of(&tmp, &["kicad", "part", &id]);
    let part: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(part["symbolIdStr"], "Device:R");
    assert_eq!(part["name"], "RC1206FR-0710KL");
    assert_eq!(part["fields"]["Comment"]["value"], "10k 1%");
    assert_eq!(part["fields"]["Comment"]["visible"], true);
    assert_eq!(
        part["fields"]["Footprint"]["value"],
        "Resistor_SMD:R_1206_3216Metric"
    );
    assert_eq!(part["fields"]["Tolerance"]["visible"], false);

    // Resistor is the first kind, so its category id is 1
    let parts = stdout_of(&tmp, &["kicad", "parts", "1"]);
    let parsed: serde_json::Value = serde_json::from_str(&parts).unwrap();
    let listed = parsed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
}

#[test]
fn test_kicad_unknown_category_fails() {
    let tmp = setup_test_project();

    edaparts()
        .current_dir(tmp.path())
        .args(["kicad", "parts", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category 99 does not exist"));
}
