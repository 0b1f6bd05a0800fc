use crate::error::Result;
use console::style;

/// Lazy page-numbered sequence over a listing endpoint.
///
/// `fetch_page` is called with 1-based page numbers until it returns an
/// empty page. A page-level failure is reported and ends the sequence
/// early (truncation, not a hard failure). Restarting means building a new
/// sequence from the same closure template.
pub struct Paged<T, F>
where
    F: FnMut(u32) -> Result<Vec<T>>,
{
    fetch_page: F,
    buffer: std::vec::IntoIter<T>,
    next_page: u32,
    done: bool,
}

pub fn paged<T, F>(fetch_page: F) -> Paged<T, F>
where
    F: FnMut(u32) -> Result<Vec<T>>,
{
    Paged {
        fetch_page,
        buffer: Vec::new().into_iter(),
        next_page: 1,
        done: false,
    }
}

impl<T, F> Iterator for Paged<T, F>
where
    F: FnMut(u32) -> Result<Vec<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(item) = self.buffer.next() {
                return Some(item);
            }
            if self.done {
                return None;
            }
            match (self.fetch_page)(self.next_page) {
                Ok(items) if items.is_empty() => {
                    self.done = true;
                }
                Ok(items) => {
                    self.next_page += 1;
                    self.buffer = items.into_iter();
                }
                Err(e) => {
                    eprintln!(
                        "{} page {} failed, truncating listing: {e}",
                        style("warning:").yellow().bold(),
                        self.next_page
                    );
                    self.done = true;
                }
            }
        }
    }
}
