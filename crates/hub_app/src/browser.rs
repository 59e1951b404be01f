use std::io;

/// Opens links outside the terminal. Injected so tests can record calls.
pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}
