use anyhow::Result;
use clap_complete::{generate, Shell};
use std::io::{self, Write};
use std::path::Path;

use fleet_cli::cli::build_cli_command;

use super::util::write_output;

/// Print the completion script for `shell`, or save it to `out`.
pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        render(shell, &mut io::stdout().lock());
        return Ok(());
    };
    let mut script = Vec::new();
    render(shell, &mut script);
    write_output(path, &script)?;
    tracing::info!(?shell, path = %path.display(), "wrote completion script");
    Ok(())
}

fn render(shell: Shell, sink: &mut dyn Write) {
    let mut command = build_cli_command();
    let bin_name = command.get_name().to_string();
    generate(shell, &mut command, bin_name, sink);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_names_binary_and_subcommands() {
        let mut script = Vec::new();
        render(Shell::Bash, &mut script);
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("fleet-cli"));
        assert!(script.contains("validate"));
    }

    #[test]
    fn test_script_saved_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("completions/fleet-cli.zsh");
        handle(Shell::Zsh, Some(&path)).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("solve"));
    }
}
