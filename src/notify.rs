/// A short user-facing message, optionally with a headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: Option<String>,
    pub description: String,
}

impl Notice {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
        }
    }

    pub fn titled(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: description.into(),
        }
    }
}

/// Sink for notices raised by a cooking session.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.title {
            Some(title) => log::info!("{title}: {}", notice.description),
            None => log::info!("{}", notice.description),
        }
    }
}

/// Prints notices on stdout for the terminal front end.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.title {
            Some(title) => println!("** {title} {}", notice.description),
            None => println!("** {}", notice.description),
        }
    }
}
