//! Block-structured catalog text parser.
//!
//! The format is deliberately forgiving about layout: `#` starts a comment,
//! blank lines vanish, and stray text between product blocks is skipped.
//! The records themselves are validated strictly, and any failure aborts
//! the whole load with no partial catalog.

use std::io::BufRead;

use thiserror::Error;
use tracing::debug;

use stockroom_core::ProductCode;
use stockroom_products::Product;

use crate::Catalog;

const BLOCK_BEGIN: &str = "BEGIN PRODUCT";
const BLOCK_END: &str = "END PRODUCT";

/// Load-time failure. Every variant is terminal for the whole parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A field line inside a block used a keyword outside the known set.
    #[error("unknown data identifier '{0}'")]
    UnknownField(String),

    /// A CODE, STOCK or PRICE value failed to parse as its numeric type.
    #[error("malformed value on line '{0}'")]
    MalformedValue(String),

    /// The stream ended inside a product block.
    #[error("product block not terminated before end of input")]
    UnterminatedBlock,

    /// A completed block was missing one or more of the five field lines.
    #[error("a product block is missing one or more data lines")]
    IncompleteRecord,

    /// A field line had no value after its keyword.
    #[error("missing value on line '{0}'")]
    MalformedLine(String),

    /// Two blocks shared a code but disagreed on name, category or price.
    #[error("product code '{0}' has conflicting data")]
    Conflict(ProductCode),

    #[error("reading catalog input failed")]
    Io(#[from] std::io::Error),
}

/// One block's fields, collected until the closing delimiter validates the
/// record as complete.
#[derive(Debug, Default)]
struct RecordDraft {
    code: Option<i64>,
    name: Option<String>,
    category: Option<String>,
    price: Option<f64>,
    stock: Option<i64>,
}

impl RecordDraft {
    /// Store one field line. A repeated keyword overwrites the earlier
    /// value; completeness is checked only when the block closes.
    fn set_field(&mut self, line: &str) -> Result<(), ParseError> {
        let Some((keyword, value)) = line.split_once(char::is_whitespace) else {
            return Err(ParseError::MalformedLine(line.to_owned()));
        };
        let value = value.trim();

        match keyword {
            "CODE" => self.code = Some(parse_number(line, value)?),
            "NAME" => self.name = Some(value.to_owned()),
            "CATEGORY" => self.category = Some(value.to_owned()),
            "PRICE" => self.price = Some(parse_number(line, value)?),
            "STOCK" => self.stock = Some(parse_number(line, value)?),
            _ => return Err(ParseError::UnknownField(keyword.to_owned())),
        }
        Ok(())
    }

    fn finish(self) -> Result<Product, ParseError> {
        match (self.code, self.name, self.category, self.price, self.stock) {
            (Some(code), Some(name), Some(category), Some(price), Some(stock)) => Ok(
                Product::new(ProductCode::new(code), name, category, price, stock),
            ),
            _ => Err(ParseError::IncompleteRecord),
        }
    }
}

fn parse_number<T: core::str::FromStr>(line: &str, value: &str) -> Result<T, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::MalformedValue(line.to_owned()))
}

/// Everything from `#` to end of line is comment text.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(position) => &line[..position],
        None => line,
    }
}

/// Read a catalog from its block-structured text form.
///
/// One atomic pass: the accumulated catalog is returned only when the whole
/// stream parses, and a later record may merge into an earlier one by
/// summing stock when the two agree on everything but quantity.
pub fn read_catalog<R: BufRead>(reader: R) -> Result<Catalog, ParseError> {
    let mut catalog = Catalog::new();
    let mut draft: Option<RecordDraft> = None;

    for line in reader.lines() {
        let raw = line?;
        let line = strip_comment(&raw).trim();
        if line.is_empty() {
            continue;
        }

        match draft.take() {
            // Top level: only a block opener matters, stray lines are
            // skipped.
            None => {
                if line == BLOCK_BEGIN {
                    draft = Some(RecordDraft::default());
                }
            }
            Some(mut record) => {
                if line == BLOCK_END {
                    merge(&mut catalog, record.finish()?)?;
                } else {
                    record.set_field(line)?;
                    draft = Some(record);
                }
            }
        }
    }

    if draft.is_some() {
        return Err(ParseError::UnterminatedBlock);
    }
    Ok(catalog)
}

/// Fold a completed record into the catalog under construction.
fn merge(catalog: &mut Catalog, product: Product) -> Result<(), ParseError> {
    if !catalog.contains(product.code()) {
        catalog.insert(product);
        return Ok(());
    }

    match catalog.get_mut(product.code()) {
        Some(existing) if *existing == product => {
            existing.adjust_stock(product.stock());
            debug!(code = %product.code(), "merged duplicate record");
            Ok(())
        }
        _ => Err(ParseError::Conflict(product.code())),
    }
}
