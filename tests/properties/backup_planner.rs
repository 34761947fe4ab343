//! Property tests for backup planning.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use upssh::domain::services::{format_timestamp, BackupPlanner};
use upssh::{DeploymentConfig, Task, TaskOrigin};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn absolute_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|parts| format!("/{}", parts.join("/")))
}

fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000, 0u32..1000).prop_map(|(secs, millis)| {
        Utc.timestamp_opt(secs, millis * 1_000_000)
            .single()
            .unwrap_or_default()
    })
}

fn config(name: String, backup_root: String, targets: Vec<String>) -> DeploymentConfig {
    DeploymentConfig {
        name,
        backup_root,
        remote_working_dir: None,
        origin: TaskOrigin::PlayFile,
        tasks: targets
            .into_iter()
            .map(|target| Task::new("/work/site", target))
            .collect(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: all backups of a multi-task run live directly under one
    /// Backup Home named after the deployment and the run timestamp.
    #[test]
    fn property_multi_task_backups_share_one_home(
        name in segment(),
        backup_root in absolute_path(),
        targets in proptest::collection::vec(absolute_path(), 2..6),
        ts in timestamp(),
    ) {
        let deployment = config(name.clone(), backup_root.clone(), targets.clone());
        let plan = BackupPlanner::default().plan(&deployment, &ts);

        let home = plan.backup_home.clone().unwrap_or_default();
        prop_assert_eq!(&home, &format!("{}/{}_{}", backup_root, name, format_timestamp(&ts)));
        prop_assert_eq!(plan.tasks.len(), targets.len());

        for (task, target) in plan.tasks.iter().zip(&targets) {
            let base = target.rsplit('/').next().unwrap_or_default();
            let backup = task.backup().unwrap_or_default();
            prop_assert_eq!(backup.to_string(), format!("{}/{}", home, base));
            prop_assert_eq!(task.target(), target.as_str());
        }
    }

    /// PROPERTY: a single task never gets a Backup Home; its backup sits
    /// directly under the backup root.
    #[test]
    fn property_single_task_has_no_home(
        backup_root in absolute_path(),
        target in absolute_path(),
        ts in timestamp(),
    ) {
        let deployment = config("site".to_string(), backup_root.clone(), vec![target.clone()]);
        let plan = BackupPlanner::default().plan(&deployment, &ts);

        prop_assert!(plan.backup_home.is_none());
        let base = target.rsplit('/').next().unwrap_or_default();
        prop_assert_eq!(
            plan.tasks[0].backup().unwrap_or_default().to_string(),
            format!("{}/{}", backup_root, base)
        );
    }

    /// PROPERTY: planning is deterministic for a given timestamp.
    #[test]
    fn property_plan_is_deterministic(
        targets in proptest::collection::vec(absolute_path(), 1..5),
        ts in timestamp(),
    ) {
        let deployment = config("site".to_string(), "/backup".to_string(), targets);
        let planner = BackupPlanner::default();
        prop_assert_eq!(planner.plan(&deployment, &ts), planner.plan(&deployment, &ts));
    }
}
