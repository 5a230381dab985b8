//! Host console used by the console syscalls.
//!
//! Guest programs read from and print to the host's standard streams. The
//! streams are boxed so embedders (and tests) can plug in their own.
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::rc::Rc;
use sysdefs::constants::err_const::Errno;

fn io_errno(e: io::Error) -> Errno {
    e.raw_os_error().map(Errno::from_raw).unwrap_or(Errno::EIO)
}

pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Console { input, output }
    }

    /// Host stdin and stdout.
    pub fn stdio() -> Self {
        Console::new(
            Box::new(BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    /// Writes all of `bytes` and flushes, so guest output interleaves with
    /// host diagnostics in order.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, Errno> {
        self.output.write_all(bytes).map_err(io_errno)?;
        self.output.flush().map_err(io_errno)?;
        Ok(bytes.len())
    }

    /// Reads one line and hands at most `limit` bytes of it to `keep`, in
    /// pieces no larger than the input buffer. The newline is never kept.
    /// Whatever does not fit is consumed and dropped, newline included, so
    /// the next read starts on the following line.
    ///
    /// Returns the number of bytes consumed from the input, 0 at end of
    /// input.
    pub fn read_line_bounded<F>(&mut self, limit: usize, mut keep: F) -> Result<usize, Errno>
    where
        F: FnMut(&[u8]),
    {
        let mut consumed = 0;
        let mut kept = 0;
        loop {
            let (used, at_newline) = {
                let available = match self.input.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(io_errno(e)),
                };
                if available.is_empty() {
                    return Ok(consumed);
                }
                let (content, used, at_newline) =
                    match available.iter().position(|&b| b == b'\n') {
                        Some(i) => (&available[..i], i + 1, true),
                        None => (available, available.len(), false),
                    };
                let take = content.len().min(limit - kept);
                if take > 0 {
                    keep(&content[..take]);
                    kept += take;
                }
                (used, at_newline)
            };
            self.input.consume(used);
            consumed += used;
            if at_newline {
                return Ok(consumed);
            }
        }
    }

    /// Reads one byte, `None` at end of input.
    pub fn read_byte(&mut self) -> Result<Option<u8>, Errno> {
        let mut byte = [0u8; 1];
        // same retry rule as read_until
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(io_errno(e)),
            }
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::stdio()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Console")
    }
}

/// Output sink whose contents stay readable after it has been handed to a
/// [`Console`]. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console over in-memory input, with output captured in the returned
/// [`SharedOutput`].
pub fn memory_console(input: &[u8]) -> (Console, SharedOutput) {
    let out = SharedOutput::new();
    let console = Console::new(
        Box::new(io::Cursor::new(input.to_vec())),
        Box::new(out.clone()),
    );
    (console, out)
}
