use crate::flog::{
    activate_flog_categories_by_pattern, categories, get_flog_file_fd, set_flog_file_fd,
    wildcard_match, FLOG,
};
use crate::should_flog;
use crate::tests::prelude::*;
use serial_test::serial;
use std::os::fd::AsRawFd;
use std::sync::atomic::Ordering;

/// Put every category back to its default state.
fn reset_categories() {
    categories::error.enabled.store(true, Ordering::Relaxed);
    categories::help.enabled.store(false, Ordering::Relaxed);
    set_flog_file_fd(libc::STDERR_FILENO);
}

#[test]
fn test_wildcard_match() {
    assert!(wildcard_match("help", "help"));
    assert!(wildcard_match("help", "*"));
    assert!(wildcard_match("help", "h*"));
    assert!(wildcard_match("help", "*p"));
    assert!(wildcard_match("help", "h?lp"));
    assert!(wildcard_match("help", "*e*"));
    assert!(wildcard_match("", "*"));
    assert!(!wildcard_match("help", "hel"));
    assert!(!wildcard_match("help", "helpx"));
    assert!(!wildcard_match("help", "e*"));
    assert!(!wildcard_match("help", "?"));
}

#[test]
#[serial]
fn test_activate_categories() {
    reset_categories();
    assert!(should_flog!(error));
    assert!(!should_flog!(help));

    activate_flog_categories_by_pattern("help");
    assert!(should_flog!(help));

    activate_flog_categories_by_pattern("-help,-error");
    assert!(!should_flog!(help));
    assert!(!should_flog!(error));

    activate_flog_categories_by_pattern("*");
    assert!(should_flog!(help));
    assert!(should_flog!(error));

    activate_flog_categories_by_pattern("*,-he?p");
    assert!(!should_flog!(help));
    assert!(should_flog!(error));

    reset_categories();
}

#[test]
#[serial]
fn test_flog_output() {
    reset_categories();
    let (read_end, write_end) = nix::unistd::pipe().unwrap();
    set_flog_file_fd(write_end.as_raw_fd());
    assert_eq!(get_flog_file_fd(), write_end.as_raw_fd());

    // Disabled categories write nothing.
    FLOG!(help, "hidden");
    activate_flog_categories_by_pattern("help");
    FLOG!(help, "shown", 42, "times");
    // Unknown categories are reported under error.
    activate_flog_categories_by_pattern("no_such_category");

    reset_categories();
    drop(write_end);
    assert_eq!(
        read_all(read_end),
        "help: shown 42 times\nerror: Failed to match debug category: no-such-category\n"
    );
}

#[test]
#[serial]
fn test_flog_disabled_fd() {
    reset_categories();
    set_flog_file_fd(-1);
    // Must not write anywhere, nor fail.
    FLOG!(error, "dropped");
    reset_categories();
}
