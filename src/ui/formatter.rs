//! Pure formatting functions for UI output.
//!
//! All operator-facing text goes through here; diagnostics go to `tracing`.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::ReleaseResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo a command line before it runs.
pub fn display_command(command_line: &str) {
    println!("{} {}", style("$").dim(), style(command_line).cyan());
}

/// Note a command skipped by dry-run mode.
pub fn display_skipped(command_line: &str) {
    println!("  {} {}", style("(dry run, skipped)").dim(), command_line);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Release summary lines, without styling.
pub fn release_info_lines(result: &ReleaseResult) -> Vec<String> {
    vec![
        "Release Info:".to_string(),
        format!("Tag: {}", result.tag),
        format!("Image: {}", result.image),
    ]
}

/// Display the summary of a finished release.
///
/// # Arguments
/// * `result` - The completed release
pub fn display_release_info(result: &ReleaseResult) {
    let lines = release_info_lines(result);
    println!("\n{}", style(&lines[0]).bold());
    for line in &lines[1..] {
        println!("  {}", line);
    }
    println!(
        "\n{} Released {}\n",
        style("✓").green(),
        style(&result.reference).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReleaseTag;
    use semver::Version;

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_command("git tag --sort=-v:refname");
        display_skipped("docker build .");
        display_boundary_warning(&BoundaryWarning::DryRun);
    }

    #[test]
    fn test_release_info_lines() {
        let result = ReleaseResult {
            tag: ReleaseTag::new(Version::parse("2.0.0").unwrap()),
            image: "registry/app".to_string(),
            reference: "registry/app:v2.0.0".to_string(),
        };
        assert_eq!(
            release_info_lines(&result),
            vec!["Release Info:", "Tag: v2.0.0", "Image: registry/app"]
        );
    }
}
