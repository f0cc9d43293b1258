//! Stats command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use noticias_domain::traits::ArticleStore;

/// Execute the stats command.
pub fn execute_stats<S>(store: &S, formatter: &Formatter) -> Result<()>
where
    S: ArticleStore,
    CliError: From<S::Error>,
{
    let stats = store.statistics()?;
    println!("{}", formatter.format_statistics(&stats)?);
    Ok(())
}
