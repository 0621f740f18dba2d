use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::model::JobListing;

/// Host capability for showing a URL to the user. Launch failures are the launcher's
/// concern and never reach the pipeline.
pub trait BrowserLauncher {
    fn open(&self, url: &str);
}

impl<T: BrowserLauncher + ?Sized> BrowserLauncher for Box<T> {
    fn open(&self, url: &str) {
        (**self).open(url)
    }
}

/// Hands URLs to the platform's default opener (`xdg-open`, `open` or `url.dll`).
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser;

/// Program and arguments that open `url` on `os` (as in `std::env::consts::OS`).
///
/// Windows goes through `rundll32` rather than `cmd /C start`, which would split the URL
/// at every `&`.
pub fn opener_command(os: &str, url: &str) -> (&'static str, Vec<String>) {
    match os {
        "windows" => (
            "rundll32",
            vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
        ),
        "macos" => ("open", vec![url.to_string()]),
        _ => ("xdg-open", vec![url.to_string()]),
    }
}

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) {
        let (program, args) = opener_command(std::env::consts::OS, url);
        // The opener hands off to the browser and exits; wait so it is reaped.
        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .and_then(|mut child| child.wait());

        match status {
            Ok(status) if status.success() => debug!(%url, "opened in browser"),
            Ok(status) => warn!(%url, %status, "browser opener exited unsuccessfully"),
            Err(e) => warn!(%url, error = %e, "failed to launch browser. Ensure a default browser opener is installed and in PATH"),
        }
    }
}

/// Writes each URL on its own line instead of launching anything.
#[derive(Debug, Clone, Default)]
pub struct StdoutLauncher;

impl BrowserLauncher for StdoutLauncher {
    fn open(&self, url: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{url}") {
            warn!(%url, error = %e, "failed to print listing");
        }
    }
}

/// Opens every listing, in order.
pub fn present<L: BrowserLauncher + ?Sized>(listings: &[JobListing], launcher: &L) {
    for listing in listings {
        launcher.open(&listing.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        opened: RefCell<Vec<String>>,
    }

    impl BrowserLauncher for Recorder {
        fn open(&self, url: &str) {
            self.opened.borrow_mut().push(url.to_string());
        }
    }

    #[test]
    fn opens_each_listing_in_order() {
        let recorder = Recorder::default();
        let listings = vec![
            JobListing::new("https://www.indeed.com/a"),
            JobListing::new("https://www.indeed.com/b"),
        ];

        present(&listings, &recorder);

        assert_eq!(
            *recorder.opened.borrow(),
            vec!["https://www.indeed.com/a".to_string(), "https://www.indeed.com/b".to_string()]
        );
    }

    #[test]
    fn windows_opener_keeps_query_string_intact() {
        let url = "https://www.indeed.com/rc/clk?jk=1&fccid=2&vjs=3";
        let (program, args) = opener_command("windows", url);

        assert_eq!(program, "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()]);
        assert!(!args.iter().any(|a| a == "/C" || a == "start"));
    }

    #[test]
    fn unix_openers_take_url_as_single_argument() {
        let url = "https://www.indeed.com/rc/clk?jk=1&fccid=2";
        assert_eq!(opener_command("macos", url), ("open", vec![url.to_string()]));
        assert_eq!(opener_command("linux", url), ("xdg-open", vec![url.to_string()]));
        assert_eq!(opener_command("freebsd", url), ("xdg-open", vec![url.to_string()]));
    }

    #[test]
    fn nothing_to_open() {
        let recorder = Recorder::default();
        present(&[], &recorder);
        assert!(recorder.opened.borrow().is_empty());
    }
}
