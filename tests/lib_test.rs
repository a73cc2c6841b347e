//! Library integration tests.

use superpip::SuperpipError;

#[test]
fn error_types_are_public() {
    let err = SuperpipError::InvalidSelection {
        message: "test".into(),
    };
    assert!(err.to_string().contains("test"));
    assert!(err.is_preflight());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> superpip::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use superpip::cli::{Cli, Commands};

    let cli = Cli::parse_from(["superpip", "installed", "--python", "3.12", "--json"]);

    if let Commands::Installed(args) = cli.command {
        assert!(args.json);
        assert_eq!(args.python.as_deref(), Some("3.12"));
    } else {
        panic!("Expected Installed command");
    }
}

#[test]
fn imports_are_public() {
    let modules = superpip::imports::extract("import os, sys\nfrom a.b import c\n");
    assert!(modules.contains("a"));
}
