//! Small tree-query layer over `scraper`
//!
//! The heuristic only ever asks three questions of a node: what is its tag,
//! does one of its classes belong to a set, and which is the first
//! descendant that satisfies both. Everything goes through these helpers.

use scraper::{ElementRef, Html};

/// Whether the element's tag name is one of `tags`
pub fn tag_in(element: &ElementRef<'_>, tags: &[&str]) -> bool {
    tags.contains(&element.value().name())
}

/// Whether any of the element's classes is one of `classes`
pub fn has_class_in(element: &ElementRef<'_>, classes: &[&str]) -> bool {
    element.value().classes().any(|class| classes.contains(&class))
}

/// Whether the element matches a tag set and, if given, a class set
pub fn matches(element: &ElementRef<'_>, tags: &[&str], classes: Option<&[&str]>) -> bool {
    tag_in(element, tags) && classes.map_or(true, |classes| has_class_in(element, classes))
}

/// Every element of the document, in document order
pub fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// Every element of the document matching the tag and class sets
pub fn select_all<'a>(
    document: &'a Html,
    tags: &'a [&'a str],
    classes: Option<&'a [&'a str]>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    elements(document).filter(move |element| matches(element, tags, classes))
}

/// First descendant of `element` (not the element itself) matching the tag
/// set and, if given, the class set
pub fn first_descendant_matching<'a>(
    element: ElementRef<'a>,
    tags: &[&str],
    classes: Option<&[&str]>,
) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|candidate| matches(candidate, tags, classes))
}

/// First descendant of `element` with the given tag that carries `attr`,
/// paired with the attribute value
pub fn first_descendant_with_attr<'a>(
    element: ElementRef<'a>,
    tag: &str,
    attr: &str,
) -> Option<(ElementRef<'a>, &'a str)> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|candidate| candidate.value().name() == tag)
        .find_map(|candidate| candidate.value().attr(attr).map(|value| (candidate, value)))
}

/// Text content with whitespace runs collapsed and the ends trimmed
pub fn clean_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
