use core::fmt;

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

/// Line-oriented terminal output.
pub struct Out<'a> {
    stream: &'a mut (dyn WriteColor + Send),
    indent: usize,
}

impl<'a> Out<'a> {
    /// Construct output over the given stream.
    pub fn new(stream: &'a mut (dyn WriteColor + Send)) -> Self {
        Self { stream, indent: 0 }
    }

    /// Construct output which indents every line by the given number of
    /// additional levels.
    pub fn indent(&mut self, levels: usize) -> Out<'_> {
        Out {
            stream: &mut *self.stream,
            indent: self.indent + levels,
        }
    }

    /// Write a regular line.
    pub fn info(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.pad()?;
        self.stream.write_fmt(args)?;
        writeln!(self.stream)
    }

    /// Write a detail line, rendered dimmed where supported.
    pub fn blank(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.pad()?;
        self.stream.set_color(ColorSpec::new().set_dimmed(true))?;
        self.stream.write_fmt(args)?;
        self.stream.reset()?;
        writeln!(self.stream)
    }

    /// Write a warning line.
    pub fn warn(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.pad()?;
        self.stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(self.stream, "warning")?;
        self.stream.reset()?;
        write!(self.stream, ": ")?;
        self.stream.write_fmt(args)?;
        writeln!(self.stream)
    }

    fn pad(&mut self) -> io::Result<()> {
        for _ in 0..self.indent {
            write!(self.stream, "  ")?;
        }

        Ok(())
    }
}

macro_rules! info {
    ($o:expr, $($tt:tt)*) => {
        $o.info(core::format_args!($($tt)*))?
    };
}

macro_rules! blank {
    ($o:expr, $($tt:tt)*) => {
        $o.blank(core::format_args!($($tt)*))?
    };
}

// Not named `warn`, which would be ambiguous with the builtin attribute
// when imported.
macro_rules! warning {
    ($o:expr, $($tt:tt)*) => {
        $o.warn(core::format_args!($($tt)*))?
    };
}

pub(crate) use {blank, info, warning};
