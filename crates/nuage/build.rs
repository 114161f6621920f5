use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only needs clap and clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR not set by Cargo"))?;

    let mut cmd = cli::Cli::command();
    write_man_pages(&cmd, &out_dir.join("man"))?;
    write_completions(&mut cmd, &out_dir.join("completions"))
}

/// `nuage.1`, then `nuage-<sub>.1` for every visible subcommand, breadth first.
fn write_man_pages(root: &clap::Command, dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let mut pending = VecDeque::from([root.clone()]);
    while let Some(page) = pending.pop_front() {
        let title = page.get_name().to_owned();
        pending.extend(
            page.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{title}-{}", sub.get_name()))),
        );

        let mut roff = Vec::new();
        clap_mangen::Man::new(page).render(&mut roff)?;
        fs::write(dir.join(format!("{title}.1")), roff)?;
    }
    Ok(())
}

fn write_completions(cmd: &mut clap::Command, dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, cmd, "nuage", dir)?;
    }
    Ok(())
}
