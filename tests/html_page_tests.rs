use titans_schedule_lambda_rust::error::ScheduleError;
use titans_schedule_lambda_rust::html_page::HtmlPage;
use titans_schedule_lambda_rust::renderer::{NodeHandle, Renderer, Scope};

const PAGE: &str = r#"<html><body>
<div id="outer" class="box">
  <section>
    <h6 class="day">Monday</h6>
    <p class="note">first   note</p>
    <table class="grid"><tr><td>a</td></tr></table>
  </section>
  <table class="grid"><tr><td>b</td></tr></table>
</div>
<table class="grid"><tr><td>c</td></tr></table>
</body></html>"#;

fn page() -> HtmlPage {
    HtmlPage::parse("https://example.test/page", PAGE)
}

fn heading(page: &HtmlPage) -> NodeHandle {
    page.select(Scope::Document, "h6.day").expect("select")[0].handle
}

fn texts(page: &HtmlPage, scope: Scope, css: &str) -> Vec<String> {
    page.select(scope, css).expect("select").into_iter().map(|n| n.text).collect()
}

#[test]
fn document_scope_lists_matches_in_order_with_collapsed_text() {
    let page = page();
    assert_eq!(texts(&page, Scope::Document, "table.grid"), vec!["a", "b", "c"]);
    assert_eq!(texts(&page, Scope::Document, "p.note"), vec!["first note"]);
}

#[test]
fn relative_scopes() {
    let page = page();
    let h6 = heading(&page);

    assert_eq!(texts(&page, Scope::FollowingSiblings(h6), "table.grid"), vec!["a"]);
    assert_eq!(texts(&page, Scope::Following(h6), "table.grid"), vec!["a", "b", "c"]);
    assert_eq!(texts(&page, Scope::Parent(h6), "table.grid"), vec!["a"]);
    assert_eq!(texts(&page, Scope::NearestAncestor(h6, "div"), "table.grid"), vec!["a", "b"]);
    assert!(texts(&page, Scope::NearestAncestor(h6, "article"), "table").is_empty());
    assert!(texts(&page, Scope::Within(h6), "table").is_empty());
}

#[test]
fn within_scope_excludes_the_node_itself() {
    let page = page();
    let outer = page.select(Scope::Document, "div.box").expect("select")[0].handle;
    assert!(texts(&page, Scope::Within(outer), "div.box").is_empty());
    assert_eq!(texts(&page, Scope::Within(outer), "td"), vec!["a", "b"]);
}

#[test]
fn following_scope_skips_own_descendants() {
    let page = page();
    let section = page.select(Scope::Document, "section").expect("select")[0].handle;
    assert_eq!(texts(&page, Scope::Following(section), "td"), vec!["b", "c"]);
}

#[test]
fn rejects_bad_selectors_and_unknown_nodes() {
    let page = page();
    assert!(matches!(page.select(Scope::Document, "td[["), Err(ScheduleError::Selector { .. })));
    assert!(matches!(
        page.select(Scope::Within(NodeHandle(usize::MAX)), "td"),
        Err(ScheduleError::UnknownNode(_))
    ));
}

#[test]
fn page_text_is_the_raw_source() {
    let page = page();
    assert_eq!(page.page_text().expect("page text"), PAGE);
    assert_eq!(page.url(), "https://example.test/page");
}
