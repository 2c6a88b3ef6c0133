//! # Plan Tests
//!
//! What the migration declares, observed through a recording context.

#[cfg(test)]
mod tests {
    use kake_migrations::prelude::*;

    #[test]
    fn test_call_log_matches_declared_deployments() {
        let mut ctx = RecordingContext::new();
        DeployContracts.configure(&mut ctx).unwrap();

        assert_eq!(
            ctx.call_log(),
            vec![
                (
                    "Kake2".to_string(),
                    vec![
                        "0x3dCD7faecD0FC34d2aD171Da01796A2dFD45DF52".to_string(),
                        "0xFf745f1A7259a4160635ac697944D077C0D0EE63".to_string(),
                    ]
                ),
                (
                    "Kake3".to_string(),
                    vec![
                        "0x3dCD7faecD0FC34d2aD171Da01796A2dFD45DF52".to_string(),
                        "0xFf745f1A7259a4160635ac697944D077C0D0EE63".to_string(),
                        "0x21caBd7F5aa6Ad763685157386709449bF09ce99".to_string(),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_plan_serializes_as_plain_json() {
        let mut ctx = RecordingContext::new();
        configure(&mut ctx).unwrap();

        let json = serde_json::to_value(ctx.calls()).unwrap();
        assert_eq!(json[0]["artifact"], "Kake2");
        assert_eq!(json[1]["args"][2], ADDR3);
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_repeated_invocations_issue_identical_requests() {
        let runs: Vec<Vec<DeploymentRequest>> = (0..3)
            .map(|_| {
                let mut ctx = RecordingContext::new();
                configure(&mut ctx).unwrap();
                ctx.into_calls()
            })
            .collect();

        assert!(runs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
