//! List command implementation.

use crate::cli::ListArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use noticias_domain::traits::ArticleStore;
use noticias_domain::Article;

/// Execute the list command.
pub fn execute_list<S>(args: ListArgs, store: &S, formatter: &Formatter) -> Result<()>
where
    S: ArticleStore,
    CliError: From<S::Error>,
{
    let articles = filter_articles(store.list()?, &args);
    println!("{}", formatter.format_articles(&articles)?);
    Ok(())
}

/// Apply the source, search and limit filters, keeping newest-first order.
fn filter_articles(articles: Vec<Article>, args: &ListArgs) -> Vec<Article> {
    let search = args.search.as_deref().map(str::to_lowercase);

    articles
        .into_iter()
        .filter(|article| {
            args.source
                .as_deref()
                .map_or(true, |source| article.source.eq_ignore_ascii_case(source))
        })
        .filter(|article| {
            search.as_deref().map_or(true, |needle| {
                article.title.to_lowercase().contains(needle)
                    || article.description.to_lowercase().contains(needle)
            })
        })
        .take(args.limit.unwrap_or(usize::MAX))
        .collect()
}
