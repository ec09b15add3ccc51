use crate::{inject, native};
use clap::{Args, Error, Parser, error::ErrorKind};
use dll_syringe::process::{OwnedProcess, Process};
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Parser, Debug)]
#[command(name = "windowhider")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hide windows from screen capture while keeping them on your display")]
struct Cli {
    #[command(flatten)]
    hide_args: HideArgs,

    #[arg(
        long,
        help = "Also remove the window from the taskbar when hiding (restore it when unhiding)"
    )]
    taskbar: bool,

    #[arg(
        long,
        help = "Let the payload decide: apply to every valid application window of the target process"
    )]
    all: bool,

    #[arg(
        short,
        long,
        help = "List visible top-level windows and their hidden state",
        conflicts_with_all = ["hide", "unhide", "taskbar", "all", "targets"]
    )]
    list: bool,

    #[arg(
        required_unless_present = "list",
        help = "Target process IDs or executable names"
    )]
    targets: Vec<String>,
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct HideArgs {
    #[arg(short = 'H', long, help = "Hide the target's windows")]
    hide: bool,

    #[arg(short, long, help = "Stop hiding the target's windows")]
    unhide: bool,
}

fn print_error(message: impl Display) {
    let _ = Error::raw(ErrorKind::InvalidValue, message).print();
}

fn list_windows() {
    for info in native::list_windows() {
        let marker = if info.hidden { "  [hidden]" } else { "" };
        println!("{:>6}  {:#010x}  {}{}", info.pid, info.hwnd, info.title, marker);
    }
}

/// Resolves each target (PID or executable name) to the processes it names.
/// Targets that resolve to nothing are reported and skipped.
fn resolve_targets(targets: Vec<String>) -> HashMap<u32, OwnedProcess> {
    targets
        .into_iter()
        .flat_map(|target| {
            if let Ok(pid) = target.parse::<u32>() {
                match OwnedProcess::from_pid(pid) {
                    Ok(process) => vec![(pid, process)],
                    Err(err) => {
                        print_error(err.to_string());
                        vec![]
                    }
                }
            } else {
                let processes = OwnedProcess::find_all_by_name(&target);

                if processes.is_empty() {
                    print_error(format!("Could not find any processes with name {}", target));
                }

                processes
                    .into_iter()
                    .filter_map(|process| match process.pid() {
                        Ok(pid) => Some((pid.get(), process)),
                        Err(err) => {
                            print_error(err.to_string());
                            None
                        }
                    })
                    .collect()
            }
        })
        .collect()
}

pub fn start() {
    let cli = Cli::parse();

    if cli.list {
        list_windows();
        return;
    }

    let hide = match (cli.hide_args.hide, cli.hide_args.unhide) {
        (true, false) => true,
        (false, true) => false,
        _ => {
            print_error("specify exactly one of --hide or --unhide");
            return;
        }
    };

    let processes = resolve_targets(cli.targets);

    if cli.all {
        // the payload's own classifier picks the windows inside each target
        for (pid, process) in processes {
            if let Err(err) = inject::apply_to_all(process, hide) {
                print_error(format!("{}: {:#}", pid, err));
            }
        }
        return;
    }

    let mut windows = native::windows_by_process();
    for (pid, process) in processes {
        match windows.remove(&pid) {
            Some(hwnds) => {
                if let Err(err) = inject::set_window_visibility(process, &hwnds, hide, cli.taskbar)
                {
                    print_error(format!("{}: {:#}", pid, err));
                }
            }
            None => print_error(format!("Cannot find any top level windows for pid {}", pid)),
        }
    }
}
