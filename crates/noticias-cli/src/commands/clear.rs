//! Clear command implementation.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use noticias_domain::traits::ArticleStore;

/// Execute the clear command, returning how many articles were removed.
pub fn execute_clear<S>(store: &mut S, formatter: &Formatter) -> Result<usize>
where
    S: ArticleStore,
    CliError: From<S::Error>,
{
    let deleted = store.delete_all()?;
    println!("{}", formatter.success(&format!("{} records deleted", deleted)));
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use noticias_domain::NewArticle;
    use noticias_store::SqliteStore;

    #[test]
    fn test_clear() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        store.create(NewArticle::new("Materia a remover 1")).unwrap();
        store.create(NewArticle::new("Materia a remover 2")).unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(execute_clear(&mut store, &formatter).unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
    }
}
