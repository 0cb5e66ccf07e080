//! `--create`: taking today's daily snapshot

use crate::common::fixtures::{local_now, snap_name};
use crate::common::{TestProject, DATASET};
use anyhow::Result;

const CONFIG: &str = "[tank/data]\ndaily = 7\nweekly = 4\nmonthly = 6\nyearly = 2\n";

fn snapshot_calls(project: &TestProject) -> Vec<String> {
    project
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("snapshot "))
        .collect()
}

#[test]
fn test_create_on_empty_dataset() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;
    let today = local_now().format("%Y-%m-%d").to_string();

    let result = project.snappy(&["--create"]).assert_success()?;

    let expected_prefix = format!("{}@snappy-{}_", DATASET, today);
    let calls = snapshot_calls(&project);
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with(&format!("snapshot {}", expected_prefix)));
    assert!(calls[0].ends_with("_daily"));

    let ops = result.operations();
    assert_eq!(ops.len(), 1);
    assert!(ops[0].starts_with(&format!("CREATE {}", expected_prefix)));
    assert!(result.contains_stdout("kept 1, promoted 0, deleted 0"));

    // Listed again after creation
    let lists = project.calls().iter().filter(|c| c.starts_with("list ")).count();
    assert_eq!(lists, 2);
    Ok(())
}

#[test]
fn test_second_create_same_day_is_skipped() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;

    project.snappy(&["--create"]).assert_success()?;
    let second = project.snappy(&["--create", "-v"]).assert_success()?;

    assert_eq!(snapshot_calls(&project).len(), 1);
    assert_eq!(project.listed_names().len(), 1);
    assert!(second.operations().is_empty());
    assert!(second.contains_stderr("daily snapshot for today already exists"));
    Ok(())
}

#[test]
fn test_unchanged_dataset_is_not_snapshotted() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;
    project.set_listing(&[(snap_name("snappy", 1, "daily"), 0)])?;

    let result = project.snappy(&["--create", "-v"]).assert_success()?;

    assert!(snapshot_calls(&project).is_empty());
    assert!(result.contains_stderr("dataset unchanged since last snapshot"));
    Ok(())
}

#[test]
fn test_changed_dataset_gets_a_new_snapshot() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;
    let yesterday = snap_name("snappy", 1, "daily");
    project.set_listing(&[(yesterday.clone(), 65536)])?;

    project.snappy(&["--create"]).assert_success()?;

    assert_eq!(snapshot_calls(&project).len(), 1);
    let listed = project.listed_names();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&yesterday));
    Ok(())
}

#[test]
fn test_dry_create_only_announces() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;

    let result = project.snappy(&["--create", "--dry"]).assert_success()?;

    assert!(project.mutating_calls().is_empty());
    assert!(project.listed_names().is_empty());
    let ops = result.operations();
    assert_eq!(ops.len(), 1);
    assert!(ops[0].starts_with(&format!("[DRY] CREATE {}@snappy-", DATASET)));
    Ok(())
}

#[test]
fn test_without_create_flag_nothing_is_taken() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config(CONFIG)?;

    let result = project.snappy(&[]).assert_success()?;

    assert!(snapshot_calls(&project).is_empty());
    assert!(result.contains_stdout("tank/data: kept 0, promoted 0, deleted 0"));
    Ok(())
}
