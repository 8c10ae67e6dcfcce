use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;

pub struct Logger {
    start_time: Instant,
    quiet: bool,
}

pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    Debug,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            start_time: Instant::now(),
            quiet,
        }
    }

    fn clear_current_line(&self) {
        if self.quiet {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn log(&self, level: &LogLevel, message: &str) {
        if self.quiet && !matches!(level, LogLevel::Error) {
            return;
        }

        self.clear_current_line();

        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "stowin".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Success => (
                "✓".bright_green().bold().to_string(),
                message.bright_green().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Debug => (
                "•".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        println!("{prefix} {colored_message}");
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        println!("{} {}", "◦".bright_cyan(), message.bright_white());
    }

    pub fn finish(&self, message: &str) {
        if self.quiet {
            return;
        }

        let elapsed = self.start_time.elapsed();
        let time_str = if elapsed.as_millis() < 1000 {
            format!("{}ms", elapsed.as_millis())
        } else {
            format!("{:.2}s", elapsed.as_secs_f64())
        };

        self.clear_current_line();
        println!(
            "{} {} {}",
            "✓".bright_green().bold(),
            message.bright_green(),
            format!("[{time_str}]").bright_black()
        );
    }

    pub fn info(&self, message: &str) {
        self.log(&LogLevel::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.log(&LogLevel::Success, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(&LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(&LogLevel::Error, message);
    }

    pub fn debug(&self, message: &str, debug_enabled: bool) {
        if debug_enabled {
            self.log(&LogLevel::Debug, message);
        }
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn init_logger(quiet: bool) {
    let _ = LOGGER.set(Logger::new(quiet));
}

fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn success(message: &str) {
    get_logger().success(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn debug(message: &str, debug_enabled: bool) {
    get_logger().debug(message, debug_enabled);
}

pub fn finish(message: &str) {
    get_logger().finish(message);
}
