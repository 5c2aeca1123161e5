//! Built-in terminal commands over the virtual file system.

use chrono::Local;
use webos_types::error::{Result, WebosError};

use crate::interpreter::{Command, CommandOutput, Environment, resolve_path};

/// Register every built-in command into a registry.
pub fn register_builtins(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(LsCmd { name: "ls" }));
    reg.register(Box::new(LsCmd { name: "dir" }));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(MkdirCmd));
    reg.register(Box::new(TouchCmd));
    reg.register(Box::new(WriteCmd));
    reg.register(Box::new(RmCmd));
}

/// Split a path into (parent, name) for creation commands, erroring on
/// the root path.
fn creation_target<'a>(cmd: &str, path: &'a str) -> Result<(String, &'a str)> {
    webos_vfs::split_parent(path)
        .ok_or_else(|| WebosError::Command(format!("{cmd}: invalid path: {path}")))
}

// ---------------------------------------------------------------------------
// ls / dir
// ---------------------------------------------------------------------------

struct LsCmd {
    /// Registered under both `ls` and `dir`.
    name: &'static str,
}

impl Command for LsCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        match self.name {
            "dir" => "dir [path]",
            _ => "ls [path]",
        }
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = match args.first() {
            Some(arg) => resolve_path(&env.cwd, arg),
            None => env.cwd.clone(),
        };
        if !env.fs.is_dir(&path) {
            return Err(WebosError::Command(format!(
                "{}: {path}: No such directory",
                self.name
            )));
        }
        let entries = env.fs.list_dir(&path);
        if entries.is_empty() {
            return Ok(CommandOutput::Text("(empty)".to_string()));
        }
        let listing: Vec<String> = entries
            .iter()
            .map(|node| {
                if node.is_dir() {
                    format!("{}/", node.name)
                } else {
                    node.name.clone()
                }
            })
            .collect();
        Ok(CommandOutput::Text(listing.join("  ")))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print the working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.cwd.clone()))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change the working directory"
    }
    fn usage(&self) -> &str {
        "cd [path]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            env.cwd = "/".to_string();
            return Ok(CommandOutput::None);
        };
        let target = resolve_path(&env.cwd, arg);
        if !env.fs.is_dir(&target) {
            return Err(WebosError::Command(format!(
                "cd: {arg}: No such directory"
            )));
        }
        env.cwd = target;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Print a file's contents"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let arg = args
            .first()
            .ok_or_else(|| WebosError::Command("usage: cat <filename>".to_string()))?;
        let path = resolve_path(&env.cwd, arg);
        match env.fs.read_file(&path) {
            Some(content) => Ok(CommandOutput::Text(content.to_string())),
            None => Err(WebosError::Command(format!("cat: {arg}: No such file"))),
        }
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print arguments"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(args.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Print the current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = Local::now();
        Ok(CommandOutput::Text(
            now.format("%b %-d, %Y, %-I:%M:%S %p").to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal scrollback"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// mkdir
// ---------------------------------------------------------------------------

struct MkdirCmd;
impl Command for MkdirCmd {
    fn name(&self) -> &str {
        "mkdir"
    }
    fn description(&self) -> &str {
        "Create a directory"
    }
    fn usage(&self) -> &str {
        "mkdir <path>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let arg = args
            .first()
            .ok_or_else(|| WebosError::Command("usage: mkdir <path>".to_string()))?;
        let path = resolve_path(&env.cwd, arg);
        let (parent, name) = creation_target("mkdir", &path)?;
        if !env.fs.is_dir(&parent) {
            return Err(WebosError::Command(format!(
                "mkdir: {parent}: No such directory"
            )));
        }
        env.fs.create_dir(&parent, name);
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// touch
// ---------------------------------------------------------------------------

struct TouchCmd;
impl Command for TouchCmd {
    fn name(&self) -> &str {
        "touch"
    }
    fn description(&self) -> &str {
        "Create an empty file"
    }
    fn usage(&self) -> &str {
        "touch <path>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let arg = args
            .first()
            .ok_or_else(|| WebosError::Command("usage: touch <path>".to_string()))?;
        let path = resolve_path(&env.cwd, arg);
        if env.fs.exists(&path) {
            // Nothing to do: no timestamps to bump in this file system.
            return Ok(CommandOutput::None);
        }
        let (parent, name) = creation_target("touch", &path)?;
        if !env.fs.is_dir(&parent) {
            return Err(WebosError::Command(format!(
                "touch: {parent}: No such directory"
            )));
        }
        env.fs.create_file(&parent, name, "");
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// write
// ---------------------------------------------------------------------------

struct WriteCmd;
impl Command for WriteCmd {
    fn name(&self) -> &str {
        "write"
    }
    fn description(&self) -> &str {
        "Write text to a file, creating it if needed"
    }
    fn usage(&self) -> &str {
        "write <file> <text...>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if args.len() < 2 {
            return Err(WebosError::Command(
                "usage: write <file> <text...>".to_string(),
            ));
        }
        let path = resolve_path(&env.cwd, args[0]);
        let text = args[1..].join(" ");
        if env.fs.read_file(&path).is_some() {
            env.fs.write_file(&path, &text);
        } else {
            let (parent, name) = creation_target("write", &path)?;
            if !env.fs.is_dir(&parent) {
                return Err(WebosError::Command(format!(
                    "write: {parent}: No such directory"
                )));
            }
            env.fs.create_file(&parent, name, &text);
        }
        Ok(CommandOutput::Text(format!(
            "Wrote {} bytes to {path}",
            text.len()
        )))
    }
}

// ---------------------------------------------------------------------------
// rm
// ---------------------------------------------------------------------------

struct RmCmd;
impl Command for RmCmd {
    fn name(&self) -> &str {
        "rm"
    }
    fn description(&self) -> &str {
        "Remove a file or directory (recursively)"
    }
    fn usage(&self) -> &str {
        "rm <path>"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let arg = args
            .first()
            .ok_or_else(|| WebosError::Command("usage: rm <path>".to_string()))?;
        let path = resolve_path(&env.cwd, arg);
        if !env.fs.exists(&path) {
            return Err(WebosError::Command(format!(
                "rm: {arg}: No such file or directory"
            )));
        }
        env.fs.delete_item(&path);
        Ok(CommandOutput::None)
    }
}

#[cfg(test)]
mod tests {
    use webos_vfs::FileSystem;

    use super::*;
    use crate::CommandRegistry;

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        reg
    }

    fn text(out: CommandOutput) -> String {
        match out {
            CommandOutput::Text(t) => t,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn ls_root_lists_default_tree() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let out = text(reg.execute("ls", &mut env).unwrap());
        assert_eq!(out, "desktop/  documents/");
    }

    #[test]
    fn dir_is_an_alias_for_ls() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let ls = text(reg.execute("ls /documents", &mut env).unwrap());
        let dir = text(reg.execute("dir /documents", &mut env).unwrap());
        assert_eq!(ls, dir);
    }

    #[test]
    fn help_for_dir_describes_the_alias() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let out = text(reg.execute("help dir", &mut env).unwrap());
        assert!(out.contains("dir [path]"));
        let out = text(reg.execute("help ls", &mut env).unwrap());
        assert!(out.contains("ls [path]"));
    }

    #[test]
    fn ls_empty_dir_prints_placeholder() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        assert_eq!(text(reg.execute("ls /desktop", &mut env).unwrap()), "(empty)");
    }

    #[test]
    fn ls_missing_dir_is_an_error() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let err = reg.execute("ls /nope", &mut env).unwrap_err();
        assert!(format!("{err}").contains("No such directory"));
    }

    #[test]
    fn cd_changes_cwd_and_pwd_reports_it() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("cd documents", &mut env).unwrap();
        assert_eq!(env.cwd, "/documents");
        assert_eq!(text(reg.execute("pwd", &mut env).unwrap()), "/documents");
    }

    #[test]
    fn cd_dotdot_and_bare_cd() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("cd /documents", &mut env).unwrap();
        reg.execute("cd ..", &mut env).unwrap();
        assert_eq!(env.cwd, "/");
        reg.execute("cd documents", &mut env).unwrap();
        reg.execute("cd", &mut env).unwrap();
        assert_eq!(env.cwd, "/");
    }

    #[test]
    fn cd_missing_dir_reports_error_and_keeps_cwd() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let err = reg.execute("cd ghost", &mut env).unwrap_err();
        assert_eq!(format!("{err}"), "command error: cd: ghost: No such directory");
        assert_eq!(env.cwd, "/");
    }

    #[test]
    fn cat_reads_relative_to_cwd() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("cd documents", &mut env).unwrap();
        let out = text(reg.execute("cat welcome.txt", &mut env).unwrap());
        assert!(out.starts_with("Welcome to WebOS!"));
    }

    #[test]
    fn cat_missing_file_and_missing_arg() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let err = reg.execute("cat ghost.txt", &mut env).unwrap_err();
        assert!(format!("{err}").contains("No such file"));
        let err = reg.execute("cat", &mut env).unwrap_err();
        assert!(format!("{err}").contains("usage: cat"));
    }

    #[test]
    fn echo_joins_arguments() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        assert_eq!(text(reg.execute("echo one two", &mut env).unwrap()), "one two");
    }

    #[test]
    fn clear_returns_the_clear_signal() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        assert_eq!(reg.execute("clear", &mut env).unwrap(), CommandOutput::Clear);
    }

    #[test]
    fn date_produces_some_text() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        assert!(!text(reg.execute("date", &mut env).unwrap()).is_empty());
    }

    #[test]
    fn mkdir_then_cd_into_it() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("mkdir projects", &mut env).unwrap();
        reg.execute("cd projects", &mut env).unwrap();
        assert_eq!(env.cwd, "/projects");
    }

    #[test]
    fn mkdir_under_missing_parent_is_an_error() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let err = reg.execute("mkdir /no/such/dir", &mut env).unwrap_err();
        assert!(format!("{err}").contains("No such directory"));
    }

    #[test]
    fn touch_creates_then_leaves_alone() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("touch /documents/new.txt", &mut env).unwrap();
        assert_eq!(env.fs.read_file("/documents/new.txt"), Some(""));

        env.fs.write_file("/documents/new.txt", "kept");
        reg.execute("touch /documents/new.txt", &mut env).unwrap();
        assert_eq!(env.fs.read_file("/documents/new.txt"), Some("kept"));
    }

    #[test]
    fn write_creates_and_overwrites() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let out = text(reg.execute("write /documents/n.txt hello there", &mut env).unwrap());
        assert!(out.contains("11 bytes"));
        assert_eq!(env.fs.read_file("/documents/n.txt"), Some("hello there"));

        reg.execute("write /documents/n.txt bye", &mut env).unwrap();
        assert_eq!(env.fs.read_file("/documents/n.txt"), Some("bye"));
    }

    #[test]
    fn rm_removes_recursively() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        reg.execute("mkdir /projects", &mut env).unwrap();
        reg.execute("write /projects/a.txt data", &mut env).unwrap();
        reg.execute("rm /projects", &mut env).unwrap();
        assert!(!env.fs.exists("/projects"));
        assert!(!env.fs.exists("/projects/a.txt"));
    }

    #[test]
    fn rm_missing_path_is_an_error() {
        let reg = registry();
        let mut fs = FileSystem::new();
        let mut env = Environment::new(&mut fs);
        let err = reg.execute("rm ghost", &mut env).unwrap_err();
        assert!(format!("{err}").contains("No such file or directory"));
    }
}
