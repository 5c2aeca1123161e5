//! WebOS desktop entry point.
//!
//! A line-oriented front end over the desktop session: terminal commands
//! run against the virtual file system, and a handful of shell commands
//! drive windows and the persisted look-and-feel. State lives in a JSON
//! snapshot file, so quitting and relaunching resumes where you left off.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;

use webos_shell::{Session, ShellConfig};
use webos_store::{JsonFileStore, shared};
use webos_terminal::{CommandOutput, CommandRegistry, Environment, register_builtins};
use webos_wm::AppType;

const CONFIG_PATH: &str = "webos.toml";
const DEFAULT_STATE_PATH: &str = "webos-state.json";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let state_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_STATE_PATH.to_string());
    log::info!("state file: {state_path}");

    let config = ShellConfig::load(Path::new(CONFIG_PATH))?;
    let store = shared(JsonFileStore::open(&state_path));
    let mut session = Session::with_config(config, store);

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);

    println!("WebOS. Type 'help' for commands, 'exit' to quit.");

    let stdin = io::stdin();
    let mut cwd = "/".to_string();
    loop {
        print!("{cwd} $ ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        if shell_command(line, &mut session)? {
            continue;
        }

        let mut env = Environment::new(session.fs_mut());
        env.cwd = cwd;
        match registry.execute(line, &mut env) {
            Ok(CommandOutput::Text(text)) => println!("{text}"),
            Ok(CommandOutput::Clear) => print!("\x1b[2J\x1b[H"),
            Ok(CommandOutput::None) => {},
            Err(e) => println!("{e}"),
        }
        cwd = env.cwd;
    }

    log::info!("session ended");
    Ok(())
}

/// Handle desktop-level commands. Returns `false` for lines the terminal
/// registry should take instead.
fn shell_command(line: &str, session: &mut Session) -> Result<bool> {
    let mut tokens = line.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(false);
    };
    let args: Vec<&str> = tokens.collect();

    match name {
        "open" => {
            match args.first() {
                Some(tag) => match tag.parse::<AppType>() {
                    Ok(app) => {
                        let id = session.launch(app);
                        println!("opened {} {id}", app.default_title());
                    },
                    // Not an app tag: treat it as a file path.
                    Err(_) if tag.starts_with('/') => {
                        if session.fs().read_file(tag).is_some() {
                            let id = session.open_file(tag);
                            println!("opened editor {id}");
                        } else {
                            println!("open: {tag}: No such file");
                        }
                    },
                    Err(e) => println!("{e}"),
                },
                None => {
                    let tags: Vec<&str> = AppType::ALL.iter().map(|a| a.tag()).collect();
                    println!("usage: open <app|/path/to/file>\napps: {}", tags.join(", "));
                },
            }
            Ok(true)
        },
        "windows" => {
            if session.wm().windows().is_empty() {
                println!("(no windows)");
                return Ok(true);
            }
            for win in session.wm().windows() {
                let marker = if Some(win.id) == session.wm().active_window_id() {
                    "*"
                } else if win.minimized {
                    "_"
                } else {
                    " "
                };
                println!(
                    "{marker} {} [{}] {} {}x{} z={}",
                    win.id, win.app_type, win.title, win.size.width, win.size.height, win.z_index,
                );
            }
            Ok(true)
        },
        "focus" | "minimize" | "maximize" | "close" => {
            let Some(id) = args.first().and_then(|a| a.parse::<u64>().ok()) else {
                println!("usage: {name} <window-id>");
                return Ok(true);
            };
            let id = webos_wm::WindowId(id);
            if session.wm().get(id).is_none() {
                println!("{name}: no window {id}");
                return Ok(true);
            }
            match name {
                "focus" => session.wm_mut().focus_window(id),
                "minimize" => session.wm_mut().minimize_window(id),
                "maximize" => session.wm_mut().maximize_window(id),
                "close" => session.wm_mut().close_window(id),
                _ => unreachable!(),
            }
            Ok(true)
        },
        "wallpaper" => {
            match args.first() {
                Some(value) => session.set_wallpaper(*value),
                None => println!("{}", session.wallpaper()),
            }
            Ok(true)
        },
        "accent" => {
            match args.first() {
                Some(value) => session.set_accent(*value),
                None => println!("{}", session.accent()),
            }
            Ok(true)
        },
        _ => Ok(false),
    }
}
