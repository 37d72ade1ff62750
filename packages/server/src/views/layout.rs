use maud::{DOCTYPE, Markup, html};
use ticksight_server_models::Page;

const MAIN_CSS_URL: &str = "/assets/main.css";
const ACCESSIBILITY_JS_URL: &str = "/assets/accessibility.js";

pub fn page(title: &str, active: Page, head: Option<Markup>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en-GB" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(MAIN_CSS_URL);
                @if let Some(head) = head {
                    (head)
                }
            }
            body {
                a class="skip-link" href="#main" { "Skip to content" }
                (header(active))
                main id="main" {
                    (content)
                }
                footer {
                    p { "TickSight UK. Sighting data is indicative only; seek medical advice if you are unwell after a tick bite." }
                }
                script src=(ACCESSIBILITY_JS_URL) {}
            }
        }
    }
}

fn header(active: Page) -> Markup {
    html! {
        header {
            a class="brand" href="/" { "TickSight UK" }
            nav aria-label="Main" {
                @for page in Page::all() {
                    @let href = format!("/?page={page}");
                    @if *page == active {
                        a href=(href) class="active" aria-current="page" { (page.label()) }
                    } @else {
                        a href=(href) { (page.label()) }
                    }
                }
                button type="button" id="contrastToggle" class="contrast-toggle" aria-pressed="false" {
                    "High contrast"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_carries_contrast_toggle() {
        let html = page("Title", Page::Prevention, None, html! { p { "body" } }).into_string();
        assert!(html.contains(r#"id="contrastToggle""#));
        assert!(html.contains(r#"aria-pressed="false""#));
        assert!(html.contains(r#"<script src="/assets/accessibility.js"></script>"#));
        assert!(html.contains(r#"<a href="/?page=prevention" class="active" aria-current="page">"#));
    }
}
