//! SPDX-License-Identifier: Apache-2.0
//! Copyright (C) 2021 Arm Limited or its affiliates and Contributors. All rights reserved.

use std::{io, io::Write};

pub struct Checkpoint {
    pub done: usize,
    pub remaining: Option<usize>,
}

pub struct ProgressReporter<'a> {
    callback: Option<Box<dyn Fn(&Checkpoint) + Sync + 'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Checkpoint) + Sync + 'a,
    {
        Self {
            callback: Some(Box::new(f)),
        }
    }

    pub fn dummy() -> Self {
        Self { callback: None }
    }

    pub fn checkpoint(&self, done: usize, remaining: Option<usize>) {
        if let Some(callback) = &self.callback {
            callback(&Checkpoint { done, remaining });
        }
    }
}

/// Reports the number of bytes passed through to the wrapped writer.
pub struct ProgressWriter<'a, T: Write> {
    reporter: &'a ProgressReporter<'a>,
    writer: T,
    remaining: Option<usize>,
    written: usize,
}

impl<'a, T: Write> ProgressWriter<'a, T> {
    pub fn new(writer: T, reporter: &'a ProgressReporter<'a>) -> Self {
        Self {
            reporter,
            writer,
            remaining: None,
            written: 0,
        }
    }

    pub fn with_known_size(writer: T, reporter: &'a ProgressReporter<'a>, size: usize) -> Self {
        Self {
            reporter,
            writer,
            remaining: Some(size),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> T {
        self.writer
    }
}

impl<'a, T: Write> Write for ProgressWriter<'a, T> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let bytes_written = self.writer.write(buf)?;
        self.written += bytes_written;
        // A server may send more than it announced.
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(bytes_written);
        }
        self.reporter.checkpoint(self.written, self.remaining);
        Ok(bytes_written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_writer_reports_remaining() -> io::Result<()> {
        let seen = Mutex::new(vec![]);
        let reporter = ProgressReporter::new(|c| {
            seen.lock().unwrap().push((c.done, c.remaining));
        });
        let mut writer = ProgressWriter::with_known_size(vec![], &reporter, 6);
        writer.write_all(b"abc")?;
        writer.write_all(b"defgh")?;
        assert_eq!(writer.written(), 8);
        assert_eq!(writer.into_inner(), b"abcdefgh");
        drop(reporter);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![(3, Some(3)), (8, Some(0))]
        );
        Ok(())
    }

    #[test]
    fn test_dummy_reporter_is_silent() -> io::Result<()> {
        let reporter = ProgressReporter::dummy();
        let mut writer = ProgressWriter::new(vec![], &reporter);
        writer.write_all(b"xyz")?;
        assert_eq!(writer.written(), 3);
        Ok(())
    }
}
