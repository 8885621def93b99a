#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands, OutputFormat};
    use crate::guest::GuestKind;
    use crate::invocation::{Operation, RestoreTarget};
    use clap::error::ErrorKind;
    use clap::Parser;

    const REPO: [&str; 4] = ["-l", "rest:https://backup.local/repo", "-p", "hunter2"];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["pve-migrate"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
    }

    fn with_repo(head: &[&str], tail: &[&str]) -> Vec<String> {
        head.iter()
            .chain(REPO.iter())
            .chain(tail.iter())
            .map(|s| s.to_string())
            .collect()
    }

    fn parse_owned(args: Vec<String>) -> Result<Cli, clap::Error> {
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        parse(&refs)
    }

    #[test]
    fn test_export() {
        let cli = parse_owned(with_repo(&["export"], &["-m", "101", "-k", "key"])).unwrap();

        let repo = cli.command.repository_args().clone();
        assert_eq!(repo.access_key.as_deref(), Some("key"));
        assert!(!repo.ask_access_key);

        let invocation = cli.command.into_invocation(Some("key".into()));
        assert_eq!(invocation.repository.url, "rest:https://backup.local/repo");
        assert_eq!(invocation.repository.password, "hunter2");
        assert_eq!(invocation.operation, Operation::Export { vmid: 101 });
    }

    #[test]
    fn test_export_requires_vmid() {
        let err = parse_owned(with_repo(&["export"], &[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_vmid_must_be_numeric() {
        let err = parse_owned(with_repo(&["export"], &["-m", "web"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_requires_url_and_password() {
        let err = parse(&["export", "-m", "101"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_access_key_flags_conflict() {
        let err = parse_owned(with_repo(&["export"], &["-m", "101", "-k", "key", "-K"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_import_lxc_defaults() {
        let cli = parse_owned(with_repo(
            &["import", "lxc"],
            &["-m", "300", "-t", "web-01", "-r", "local-lvm", "-s", "8"],
        ))
        .unwrap();

        let invocation = cli.command.into_invocation(None);
        match invocation.operation {
            Operation::Import(options) => {
                assert_eq!(options.vmid, 300);
                assert_eq!(options.template, "web-01");
                assert_eq!(options.storage, "local-lvm");
                assert!(!options.force);
                assert!(options.unique);
                assert_eq!(
                    options.target,
                    RestoreTarget::Container {
                        hostname: "web-01".into(),
                        root_size_gb: 8,
                    }
                );
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_import_lxc_overrides() {
        let cli = parse_owned(with_repo(
            &["import", "lxc"],
            &[
                "-m", "300", "-t", "web-01", "-r", "local-lvm", "-s", "16GiB", "-n", "web-02", "-f",
                "--no-unique",
            ],
        ))
        .unwrap();

        match cli.command.into_invocation(None).operation {
            Operation::Import(options) => {
                assert!(options.force);
                assert!(!options.unique);
                assert_eq!(
                    options.target,
                    RestoreTarget::Container {
                        hostname: "web-02".into(),
                        root_size_gb: 16,
                    }
                );
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_import_lxc_requires_size() {
        let err = parse_owned(with_repo(
            &["import", "lxc"],
            &["-m", "300", "-t", "web-01", "-r", "local-lvm"],
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_import_lxc_rejects_bad_size() {
        let err = parse_owned(with_repo(
            &["import", "lxc"],
            &["-m", "300", "-t", "web-01", "-r", "local-lvm", "-s", "0"],
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_import_kvm() {
        let cli = parse_owned(with_repo(
            &["import", "kvm"],
            &["-m", "400", "-t", "db-main", "-r", "ceph"],
        ))
        .unwrap();

        match cli.command.into_invocation(None).operation {
            Operation::Import(options) => {
                assert_eq!(options.target, RestoreTarget::Vm);
                assert_eq!(options.storage, "ceph");
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn test_import_kvm_has_no_hostname() {
        let err = parse_owned(with_repo(
            &["import", "kvm"],
            &["-m", "400", "-t", "db-main", "-r", "ceph", "-n", "host"],
        ))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_import_requires_kind() {
        let err = parse(&["import"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_list() {
        let cli = parse_owned(with_repo(&["list"], &["-y", "kvm", "--format", "json"])).unwrap();

        match &cli.command {
            Commands::List { kind, format, .. } => {
                assert_eq!(*kind, Some(GuestKind::Kvm));
                assert_eq!(*format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert_eq!(
            cli.command.into_invocation(None).operation,
            Operation::List {
                kind: Some(GuestKind::Kvm)
            }
        );
    }

    #[test]
    fn test_list_without_filter() {
        let cli = parse_owned(with_repo(&["list"], &["-K"])).unwrap();

        assert!(cli.command.repository_args().ask_access_key);
        assert_eq!(
            cli.command.into_invocation(None).operation,
            Operation::List { kind: None }
        );
    }

    #[test]
    fn test_list_rejects_unknown_kind() {
        let err = parse_owned(with_repo(&["list"], &["-y", "docker"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_owned(with_repo(
            &["list"],
            &["-v", "--config", "/etc/pve-migrate.toml"],
        ))
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/etc/pve-migrate.toml"))
        );
    }
}
