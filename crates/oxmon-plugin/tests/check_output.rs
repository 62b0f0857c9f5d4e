use oxmon_plugin::io::{RecordingExit, SharedBuffer};
use oxmon_plugin::{CheckRun, Severity};

fn run_check<F>(body: F) -> (String, i32)
where
    F: FnOnce(&mut CheckRun) -> anyhow::Result<()>,
{
    let output = SharedBuffer::new();
    let exit = RecordingExit::new();
    CheckRun::new("check_service", "1.0.0", output.clone(), exit.clone()).run(body);
    let code = exit.exit_code().unwrap_or(-1);
    (output.contents(), code)
}

#[test]
fn nothing_reported() {
    assert_eq!(run_check(|_| Ok(())), ("OK:\n".to_string(), 0));
}

#[test]
fn single_metric_without_thresholds() {
    let (out, code) = run_check(|check| {
        check.add_metric("m1", 123.456, &[])?;
        Ok(())
    });
    assert_eq!(out, "OK: | m1=123.456;;;;\n");
    assert_eq!(code, 0);
}

#[test]
fn metric_name_with_space_is_quoted() {
    let (out, _) = run_check(|check| {
        check.add_metric("white space", 123.456, &[])?;
        Ok(())
    });
    assert_eq!(out, "OK: | 'white space'=123.456;;;;\n");
}

#[test]
fn warning_breach() {
    let (out, code) = run_check(|check| {
        check.add_metric("m1", 123.456, &["", "100"])?;
        Ok(())
    });
    assert_eq!(out, "WARNING: m1 is 123.456 (outside 100) | m1=123.456;100;;;\n");
    assert_eq!(code, 1);
}

#[test]
fn critical_overrides_warning() {
    let (out, code) = run_check(|check| {
        check.add_metric("m1", 123.456, &["TB", "100", "123"])?;
        Ok(())
    });
    assert_eq!(
        out,
        "CRITICAL: m1 is 123.456TB (outside 123) | m1=123.456TB;100;123;;\n"
    );
    assert_eq!(code, 2);
}

#[test]
fn duplicate_keeps_first_value() {
    let (out, code) = run_check(|check| {
        check.add_metric("m1", 123.456, &[])?;
        let err = check.add_metric("m1", 0.0, &["", "1"]).unwrap_err();
        assert_eq!(err.to_string(), "Duplicated metric m1");
        Ok(())
    });
    assert_eq!(out, "OK: | m1=123.456;;;;\n");
    assert_eq!(code, 0);
}

#[test]
fn service_example() {
    let (out, code) = run_check(|check| {
        check.add_message(format!("Service {}:{}", "localhost", 123));
        check.add_metric("uptime", 123456, &["s"])?;
        check.add_metric("processes", 789, &[])?;
        Ok(())
    });
    assert_eq!(
        out,
        "OK: Service localhost:123 | processes=789;;;; uptime=123456s;;;;\n"
    );
    assert_eq!(code, Severity::Ok.exit_code());
}

#[test]
fn unrecovered_fault_still_reports() {
    let (out, code) = run_check(|check| {
        check.add_result(Severity::Warning, "partial data");
        let samples: Vec<f64> = Vec::new();
        let _first = samples[0];
        Ok(())
    });
    assert!(out.starts_with("CRITICAL: check_service panic: index out of bounds"), "{out}");
    assert!(out.ends_with('\n'));
    assert_eq!(code, 2);
}
