use std::{
    fmt::Debug,
    io::{self, Write},
    time::{Duration, Instant},
};

/// Runs `f` and returns its output along with how long it took.
pub fn timeit<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Like `timeit`, but for a fallible `f`. Errors are returned without a
/// duration.
pub fn timeitr<T, E>(
    f: impl FnOnce() -> Result<T, E>,
) -> Result<(T, Duration), E> {
    let (out, elapsed) = timeit(f);
    out.map(|out| (out, elapsed))
}

/// Labeled values printed as two right aligned columns.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<(&'static str, String)>,
}

impl Table {
    pub fn empty() -> Table {
        Table::default()
    }

    pub fn add<D: Debug>(&mut self, label: &'static str, value: D) {
        self.rows.push((label, format!("{:?}", value)));
    }

    pub fn print<W: Write>(&self, wtr: W) -> io::Result<()> {
        let mut wtr = tabwriter::TabWriter::new(wtr)
            .alignment(tabwriter::Alignment::Right);
        for &(label, ref value) in self.rows.iter() {
            writeln!(wtr, "{}:\t{}", label, value)?;
        }
        wtr.flush()
    }
}
