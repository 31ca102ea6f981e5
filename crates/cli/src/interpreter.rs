//! Line-command interpreter over a live catalog.
//!
//! One session owns the catalog; each loop iteration consumes one command
//! line, resolves an abbreviated verb against a fixed-order table and runs
//! the matching handler. Command failures are reported and the loop keeps
//! going; only an empty line (or end of input) ends the session.

use std::io::{BufRead, Write};

use tracing::debug;

use stockroom_catalog::Catalog;
use stockroom_core::{DomainError, ProductCode};

/// What a command needs in its parameter slot for a table entry to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamRule {
    /// The parameter string must be empty.
    None,
    /// The parameter string must be non-empty.
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    PrintAll,
    PrintOne,
    Delete,
    Change,
    Low,
    Combine,
    Sale,
}

/// Fixed-order resolution table. The typed token is matched
/// case-insensitively as a prefix of each keyword in turn; the first entry
/// whose keyword matches and whose parameter rule is satisfied wins. The
/// order is the tie-break for ambiguous abbreviations, so it must not be
/// reordered.
const COMMANDS: &[(&str, ParamRule, Verb)] = &[
    ("print", ParamRule::None, Verb::PrintAll),
    ("print", ParamRule::Required, Verb::PrintOne),
    ("delete", ParamRule::Required, Verb::Delete),
    ("change", ParamRule::Required, Verb::Change),
    ("low", ParamRule::None, Verb::Low),
    ("combine", ParamRule::Required, Verb::Combine),
    ("sale", ParamRule::Required, Verb::Sale),
];

fn resolve(token: &str, params: &str) -> Option<Verb> {
    let token = token.to_lowercase();
    COMMANDS.iter().find_map(|(keyword, rule, verb)| {
        let params_ok = match rule {
            ParamRule::None => params.is_empty(),
            ParamRule::Required => !params.is_empty(),
        };
        (params_ok && keyword.starts_with(&token)).then_some(*verb)
    })
}

/// One interactive session: the live catalog plus its IO endpoints.
pub struct Session<R, W> {
    catalog: Catalog,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(catalog: Catalog, reader: R, writer: W) -> Self {
        Self {
            catalog,
            reader,
            writer,
        }
    }

    /// Give the catalog back once the session is over.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Read-evaluate loop. Ends cleanly on the first empty input line or at
    /// end of input; IO failures end the session by propagating.
    pub fn run(&mut self) -> std::io::Result<()> {
        loop {
            write!(self.writer, "Enter command: ")?;
            self.writer.flush()?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim();
            if line.is_empty() {
                return Ok(());
            }

            self.execute(line)?;
        }
    }

    /// Run one already-trimmed command line against the catalog.
    pub fn execute(&mut self, line: &str) -> std::io::Result<()> {
        let (token, params) = match line.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, rest.trim_start()),
            None => (line, ""),
        };

        let Some(verb) = resolve(token, params) else {
            return writeln!(self.writer, "Error: bad command line '{line}'.");
        };

        debug!(?verb, params, "executing command");
        match verb {
            Verb::PrintAll => self.print_all(),
            Verb::PrintOne => self.print_one(params),
            Verb::Delete => self.delete(params),
            Verb::Change => self.change(params),
            Verb::Low => self.low(),
            Verb::Combine => self.combine(params),
            Verb::Sale => self.sale(params),
        }
    }

    fn print_all(&mut self) -> std::io::Result<()> {
        for product in self.catalog.iter() {
            writeln!(self.writer, "{product}")?;
        }
        Ok(())
    }

    fn print_one(&mut self, params: &str) -> std::io::Result<()> {
        let found = params
            .parse::<ProductCode>()
            .ok()
            .and_then(|code| self.catalog.get(code));
        match found {
            Some(product) => writeln!(self.writer, "{product}"),
            None => writeln!(
                self.writer,
                "Error: product '{params}' can not be printed as it does not exist."
            ),
        }
    }

    fn delete(&mut self, params: &str) -> std::io::Result<()> {
        let Ok(code) = params.parse::<ProductCode>() else {
            return writeln!(
                self.writer,
                "Error: product '{params}' can not be deleted as it does not exist."
            );
        };

        match self.catalog.remove(code) {
            Ok(_) => Ok(()),
            Err(DomainError::StockRemains(_)) => writeln!(
                self.writer,
                "Error: product '{code}' can not be deleted as stock remains."
            ),
            Err(_) => writeln!(
                self.writer,
                "Error: product '{params}' can not be deleted as it does not exist."
            ),
        }
    }

    fn change(&mut self, params: &str) -> std::io::Result<()> {
        let tokens: Vec<&str> = params.split_whitespace().collect();
        let &[code_text, amount_text] = tokens.as_slice() else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for change command."
            );
        };
        let (Ok(code), Ok(amount)) = (
            code_text.parse::<ProductCode>(),
            amount_text.parse::<i64>(),
        ) else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for change command."
            );
        };

        match self.catalog.adjust_stock(code, amount) {
            Ok(()) => Ok(()),
            Err(_) => writeln!(
                self.writer,
                "Error: stock for '{code_text}' can not be changed as it does not exist."
            ),
        }
    }

    fn low(&mut self) -> std::io::Result<()> {
        for product in self
            .catalog
            .iter()
            .filter(|product| product.is_below_reorder_threshold())
        {
            writeln!(self.writer, "{product}")?;
        }
        Ok(())
    }

    fn combine(&mut self, params: &str) -> std::io::Result<()> {
        let tokens: Vec<&str> = params.split_whitespace().collect();
        let &[first, second] = tokens.as_slice() else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for combine command."
            );
        };
        let (Ok(target), Ok(source)) = (
            first.parse::<ProductCode>(),
            second.parse::<ProductCode>(),
        ) else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for combine command."
            );
        };

        match self.catalog.combine(target, source) {
            Ok(()) => Ok(()),
            Err(DomainError::CategoryMismatch(left, right)) => writeln!(
                self.writer,
                "Error: combining items of different categories '{left}' and '{right}'."
            ),
            Err(DomainError::PriceMismatch(left, right)) => writeln!(
                self.writer,
                "Error: combining items with different prices {left:.2}€ and {right:.2}€."
            ),
            Err(_) => writeln!(
                self.writer,
                "Error: bad parameters '{params}' for combine command."
            ),
        }
    }

    fn sale(&mut self, params: &str) -> std::io::Result<()> {
        let tokens: Vec<&str> = params.split_whitespace().collect();
        let &[category, percent_text] = tokens.as_slice() else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for sale command."
            );
        };
        let Ok(percent) = percent_text.parse::<f64>() else {
            return writeln!(
                self.writer,
                "Error: bad parameters '{params}' for sale command."
            );
        };

        let count = self.catalog.apply_sale(category, percent);
        writeln!(self.writer, "Sale price set for {count} items.")
    }
}
