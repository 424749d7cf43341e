use std::{collections::VecDeque, sync::Arc};

use futures::io::{AsyncRead, AsyncReadExt};

use crate::{
    error::{Error, Result},
    sequence::{AsyncEnumerator, AsyncSequence},
};

const DEFAULT_CHUNK: usize = 8 * 1024;

/// Splits the bytes of an [`AsyncRead`] into UTF-8 lines.
///
/// `open` is called once per enumeration, on its first `advance`, so creating
/// the enumerator never touches the reader. Each `advance` reads one chunk
/// and queues every complete line in it; those lines are then handed out by
/// `try_get_next` without suspending. Line terminators (`\n` or `\r\n`) are
/// stripped, and a final line without terminator is still produced.
///
/// # Example
/// ```
/// use futures::io::Cursor;
/// use lazypull::{AsyncSequenceExt, lines};
///
/// # futures::executor::block_on(async {
/// let seq = lines(|| Cursor::new(b"alpha\nbeta\r\ngamma".to_vec()));
/// assert_eq!(seq.to_list().await?, vec!["alpha", "beta", "gamma"]);
/// # Ok::<_, lazypull::Error>(())
/// # }).unwrap();
/// ```
pub fn lines<R, F>(open: F) -> Lines<F>
where
    F: Fn() -> R,
    R: AsyncRead + Unpin,
{
    lines_with_capacity(open, DEFAULT_CHUNK)
}

/// Like [`lines`], reading at most `chunk` bytes per `advance`.
///
/// A `chunk` of zero is treated as one.
pub fn lines_with_capacity<R, F>(open: F, chunk: usize) -> Lines<F>
where
    F: Fn() -> R,
    R: AsyncRead + Unpin,
{
    Lines {
        open: Arc::new(open),
        chunk: chunk.max(1),
    }
}

/// Sequence returned by [`lines`].
pub struct Lines<F> {
    open: Arc<F>,
    chunk: usize,
}

impl<F> Clone for Lines<F> {
    fn clone(&self) -> Self {
        Self {
            open: Arc::clone(&self.open),
            chunk: self.chunk,
        }
    }
}

impl<R, F> AsyncSequence for Lines<F>
where
    F: Fn() -> R,
    R: AsyncRead + Unpin,
{
    type Item = String;
    type Enumerator = LinesEnumerator<R, F>;

    fn enumerator(&self) -> Self::Enumerator {
        LinesEnumerator {
            lines: VecDeque::new(),
            partial: Vec::new(),
            buf: vec![0; self.chunk],
            reader: None,
            open: Arc::clone(&self.open),
            eof: false,
        }
    }
}

/// Enumerator for [`Lines`].
pub struct LinesEnumerator<R, F> {
    lines: VecDeque<String>,
    partial: Vec<u8>,
    buf: Vec<u8>,
    reader: Option<R>,
    open: Arc<F>,
    eof: bool,
}

impl<R, F> AsyncEnumerator for LinesEnumerator<R, F>
where
    F: Fn() -> R,
    R: AsyncRead + Unpin,
{
    type Item = String;

    fn try_get_next(&mut self) -> Option<Self::Item> {
        self.lines.pop_front()
    }

    async fn advance(&mut self) -> Result<bool> {
        if !self.lines.is_empty() {
            return Ok(true);
        }
        if self.eof {
            return Ok(false);
        }

        let reader = self.reader.get_or_insert_with(|| (self.open)());
        loop {
            let n = reader.read(&mut self.buf).await?;
            if n == 0 {
                self.eof = true;
                self.reader = None;
                if !self.partial.is_empty() {
                    let last = core::mem::take(&mut self.partial);
                    self.lines.push_back(decode(last)?);
                }
                return Ok(!self.lines.is_empty());
            }

            split_lines(&self.buf[..n], &mut self.partial, &mut self.lines)?;
            if !self.lines.is_empty() {
                #[cfg(feature = "tracing")]
                tracing::trace!(bytes = n, lines = self.lines.len(), "read chunk");
                return Ok(true);
            }
        }
    }
}

/// Appends `bytes` to `partial`, moving every completed line into `lines`.
fn split_lines(bytes: &[u8], partial: &mut Vec<u8>, lines: &mut VecDeque<String>) -> Result<()> {
    let mut rest = bytes;
    while let Some(pos) = rest.iter().position(|b| *b == b'\n') {
        partial.extend_from_slice(&rest[..pos]);
        let mut line = core::mem::take(partial);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push_back(decode(line)?);
        rest = &rest[pos + 1..];
    }
    partial.extend_from_slice(rest);
    Ok(())
}

fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(e.to_string()))
}
