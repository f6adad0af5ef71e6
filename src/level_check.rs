/*
ShootemUp - Arcade Shooter
*/
use std::path::PathBuf;
use std::process::ExitCode;

use shootlib::level_loader::{read_levels, RecordedDiagnostics};

// Distinct Codes so Scripts Can Tell a Bad Invocation From a Dirty File
const EXIT_REJECTED_LINES: u8 = 2;
const EXIT_USAGE: u8 = 64;

fn main() -> ExitCode {
    let path = parse_args();
    let mut diag = RecordedDiagnostics::default();

    let result = read_levels(&path, &mut diag);

    for r in &diag.rejected {
        eprintln!("line {}: {} ('{}')", r.line_no, r.error, r.line);
    }

    match result {
        Ok((levels, report)) => {
            for l in &levels {
                println!(
                    "{:>4}  {:<20} spawn {:>5.2}  speed {:>6.1}  health {:>3}  required {:>3}",
                    l.level_number,
                    l.name,
                    l.enemy_spawn_rate,
                    l.enemy_speed,
                    l.enemy_health,
                    l.enemies_required,
                );
            }
            eprintln!("checked {}", path.display());
            eprintln!("levels {}  rejected {}", report.loaded, report.rejected);
            ExitCode::from(exit_status(report.rejected))
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn exit_status(rejected: usize) -> u8 {
    if rejected > 0 { EXIT_REJECTED_LINES } else { 0 }
}

fn parse_args() -> PathBuf {
    let mut path = PathBuf::from("assets/levels.txt");

    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--levels" => {
                if let Some(v) = it.next() {
                    path = PathBuf::from(v);
                }
            }
            _ => {
                eprintln!("usage: level_check [--levels <path>]");
                std::process::exit(i32::from(EXIT_USAGE));
            }
        }
    }

    path
}
