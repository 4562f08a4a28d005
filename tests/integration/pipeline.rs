//! End-to-end pipeline scenarios.

use tempfile::TempDir;

use specgate::commands::verify;

use crate::helpers::{json_options, read_json, write_file, ADVISORY_CONSTITUTION};

#[test]
fn test_uncovered_requirement_fails_the_gate() {
    let dir = TempDir::new().unwrap();
    let human = write_file(
        dir.path(),
        "human.txt",
        "Passwords MUST be encrypted and never logged in plaintext. [SRC:email-security-002]\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The system shall provide title search for the catalog\n",
    );
    let constitution = write_file(dir.path(), "constitution.txt", ADVISORY_CONSTITUTION);
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- Search supports title and author lookup\n\
         - The storefront displays featured books\n",
    );
    let output = dir.path().join("report.json");

    let code = verify::execute(json_options(
        human,
        reqs,
        constitution,
        spec,
        output.clone(),
    ))
    .unwrap();
    assert_eq!(code, 1);

    let report = read_json(&output);
    let records = report.as_array().unwrap();
    let coverage = records
        .iter()
        .find(|r| r["category"] == "COVERAGE" && r["severity"] == "CRITICAL")
        .expect("expected a critical coverage violation");
    let related = coverage["related_requirements"].as_array().unwrap();
    assert!(!related.is_empty());
    assert!(related[0].as_str().unwrap().starts_with("REQ_"));
}

#[test]
fn test_covered_requirements_pass_the_gate() {
    let dir = TempDir::new().unwrap();
    let human = write_file(
        dir.path(),
        "human.txt",
        "The system MUST allow search by title, author, or ISBN\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The system shall provide title search for the catalog\n",
    );
    let constitution = write_file(dir.path(), "constitution.txt", ADVISORY_CONSTITUTION);
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- The system MUST allow search by title, author, or ISBN\n\
         - Search must provide title lookup across the whole catalog\n",
    );
    let output = dir.path().join("report.json");

    let code = verify::execute(json_options(
        human,
        reqs,
        constitution,
        spec,
        output.clone(),
    ))
    .unwrap();
    assert_eq!(code, 0);

    let report = read_json(&output);
    let has_coverage = report
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["category"] == "COVERAGE");
    assert!(!has_coverage);
}

#[test]
fn test_contradictory_specification_lines_are_reported() {
    let dir = TempDir::new().unwrap();
    let human = write_file(
        dir.path(),
        "human.txt",
        "The API must return search results quickly [SRC:transcript-001]\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The API should keep search results response time low\n",
    );
    let constitution = write_file(dir.path(), "constitution.txt", ADVISORY_CONSTITUTION);
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- The API returns search results response time under 2 seconds\n\
         - The API does not guarantee search results response time bounds\n",
    );
    let output = dir.path().join("report.json");

    let code = verify::execute(json_options(
        human,
        reqs,
        constitution,
        spec,
        output.clone(),
    ))
    .unwrap();
    assert_eq!(code, 1);

    let report = read_json(&output);
    let contradiction = report
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["category"] == "CONTRADICTION")
        .expect("expected a contradiction violation");
    assert_eq!(contradiction["severity"], "CRITICAL");
    let lines = contradiction["line_numbers"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_disabled_deep_analysis_leaves_violations_bare() {
    let dir = TempDir::new().unwrap();
    // Requirements carry source references, but retrieval stays disabled.
    let human = write_file(
        dir.path(),
        "human.txt",
        "Passwords MUST be encrypted and never logged in plaintext. [SRC:email-security-002]\n\
         The cart MUST persist totals across sessions [DOC:design-doc-v2]\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The system shall provide title search for the catalog\n",
    );
    let constitution = write_file(dir.path(), "constitution.txt", ADVISORY_CONSTITUTION);
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- Search supports title and author lookup\n",
    );
    let output = dir.path().join("report.json");

    verify::execute(json_options(
        human,
        reqs,
        constitution,
        spec,
        output.clone(),
    ))
    .unwrap();

    let report = read_json(&output);
    for record in report.as_array().unwrap() {
        assert!(record["source_documents"].as_array().unwrap().is_empty());
        assert!(record["deep_analysis"].is_null());
    }
}

#[test]
fn test_identical_inputs_yield_identical_reports() {
    let dir = TempDir::new().unwrap();
    let human = write_file(
        dir.path(),
        "human.txt",
        "Passwords MUST be encrypted and never logged in plaintext\n\
         The system MUST allow search by title, author, or ISBN\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The checkout flow must validate payment details before submission\n",
    );
    let constitution = write_file(
        dir.path(),
        "constitution.txt",
        "SECURITY\n- Sensitive data must never appear in logs\n",
    );
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- Search supports title and author lookup\n\
         - All authentication attempts are logged for debugging\n",
    );

    let first_out = dir.path().join("first.json");
    let second_out = dir.path().join("second.json");

    verify::execute(json_options(
        human.clone(),
        reqs.clone(),
        constitution.clone(),
        spec.clone(),
        first_out.clone(),
    ))
    .unwrap();
    verify::execute(json_options(
        human,
        reqs,
        constitution,
        spec,
        second_out.clone(),
    ))
    .unwrap();

    let first = std::fs::read_to_string(&first_out).unwrap();
    let second = std::fs::read_to_string(&second_out).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_human_report_written_to_file_is_plain_text() {
    let dir = TempDir::new().unwrap();
    let human = write_file(
        dir.path(),
        "human.txt",
        "The system MUST allow search by title, author, or ISBN\n",
    );
    let reqs = write_file(
        dir.path(),
        "reqs.txt",
        "The system shall provide title search for the catalog\n",
    );
    let constitution = write_file(dir.path(), "constitution.txt", ADVISORY_CONSTITUTION);
    let spec = write_file(
        dir.path(),
        "spec.txt",
        "- Search supports title and author lookup\n",
    );
    let output = dir.path().join("report.txt");

    let mut opts = json_options(human, reqs, constitution, spec, output.clone());
    opts.json = false;

    verify::execute(opts).unwrap();

    let report = std::fs::read_to_string(&output).unwrap();
    assert!(report.contains("ADVERSARIAL SPECIFICATION VERIFICATION REPORT"));
    assert!(report.contains("VERDICT"));
    assert!(!report.contains('\u{1b}'), "file report must not carry ANSI escapes");
}

#[test]
fn test_missing_mandatory_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let human = write_file(dir.path(), "human.txt", "The system MUST do something useful\n");
    let reqs = write_file(dir.path(), "reqs.txt", "The system shall do something else\n");
    let constitution = dir.path().join("missing-constitution.txt");
    let spec = write_file(dir.path(), "spec.txt", "- It does a specific useful thing\n");
    let output = dir.path().join("report.json");

    let result = verify::execute(json_options(human, reqs, constitution, spec, output));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("File not found"));
}
