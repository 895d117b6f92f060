//! Support thread on the contact page.
//!
//! Polls the history endpoint while the tab is visible and repaints the thread only when
//! the sync engine reports a change.

use crate::api::FetchHistorySource;
use crate::dom::{self, Page};
use bip_thread_sync::{
    Bubble, POLL_INTERVAL, PollLoop, Scheduler, SyncOutcome, ThreadSettings, ThreadSync,
    ThreadView, Visibility, refresh,
};
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement};

/// Container, sync state and source for one thread.
pub struct ThreadPage {
    container: HtmlElement,
    sync: RefCell<ThreadSync>,
    source: FetchHistorySource,
}

impl ThreadPage {
    /// `None` when the page has no thread container or it carries no history URL.
    pub fn bind() -> Option<Rc<ThreadPage>> {
        let container = dom::query_typed::<HtmlElement>("[data-contact-thread]")?;
        let url = dom::data_non_empty(&container, "historyUrl")?;
        let settings = ThreadSettings::from_dataset(|key| dom::data(&container, key));

        Some(Rc::new(ThreadPage {
            sync: RefCell::new(ThreadSync::new(settings)),
            source: FetchHistorySource::new(url),
            container,
        }))
    }

    fn fetch_now(self: &Rc<Self>) {
        let page = Rc::clone(self);
        spawn_local(async move {
            match refresh(&page.sync, &page.source).await {
                SyncOutcome::Rendered(view) => {
                    if let Err(e) = page.paint(&view) {
                        gloo_console::error!("[contact-thread] paint failed", e);
                    }
                }
                SyncOutcome::Failed(reason) => {
                    gloo_console::error!("[contact-thread] Unable to refresh thread", reason);
                }
                SyncOutcome::Unchanged | SyncOutcome::Stale => {}
            }
        });
    }

    fn paint(&self, view: &ThreadView) -> Result<(), JsValue> {
        let container = &self.container;
        container.set_inner_html("");

        match view {
            ThreadView::Empty(copy) => {
                let empty = dom::create_html("div", "messenger-empty")?;
                let title = dom::create_html("p", "messenger-empty__title")?;
                dom::set_text(&title, &copy.title);
                let body = dom::create_html("p", "")?;
                dom::set_text(&body, &copy.body);
                empty.append_child(&title)?;
                empty.append_child(&body)?;
                container.append_child(&empty)?;
            }
            ThreadView::Bubbles(bubbles) => {
                let frag = dom::document()?.create_document_fragment();
                for bubble in bubbles {
                    let el = bubble_element(bubble)?;
                    frag.append_child(&el)?;
                }
                container.append_child(&frag)?;
                container.set_scroll_top(container.scroll_height());
            }
        }
        Ok(())
    }
}

fn bubble_element(bubble: &Bubble) -> Result<Element, JsValue> {
    let article = dom::create_html("article", &format!("bubble bubble--{}", bubble.kind.modifier()))?;

    let avatar = dom::create_html("div", "bubble__avatar")?;
    avatar.set_attribute("aria-hidden", "true")?;
    dom::set_text(&avatar, &bubble.initials);

    let body = dom::create_html("div", "bubble__body")?;
    let meta = dom::create_html("div", "bubble__meta")?;
    let name = dom::create_element("strong")?;
    dom::set_text(&name, &bubble.name);
    let time = dom::create_element("small")?;
    dom::set_text(&time, &bubble.timestamp);
    meta.append_child(&name)?;
    meta.append_child(&time)?;
    body.append_child(&meta)?;

    if let Some(subject) = &bubble.subject {
        let p = dom::create_html("p", "bubble__subject")?;
        dom::set_text(&p, subject);
        body.append_child(&p)?;
    }

    let message = dom::create_element("p")?;
    dom::set_text(&message, &bubble.body);
    body.append_child(&message)?;

    if !bubble.footer.is_empty() {
        let footer = dom::create_html("div", "bubble__footer")?;
        for text in &bubble.footer {
            let small = dom::create_element("small")?;
            dom::set_text(&small, text);
            footer.append_child(&small)?;
        }
        body.append_child(&footer)?;
    }

    article.append_child(&avatar)?;
    article.append_child(&body)?;
    Ok(article.into())
}

/// Poll ticks via `setInterval`; dropping the [`Interval`] clears it.
pub struct IntervalScheduler {
    page: Rc<ThreadPage>,
}

impl Scheduler for IntervalScheduler {
    type Handle = Interval;

    fn every(&mut self, period: Duration) -> Interval {
        let page = Rc::clone(&self.page);
        Interval::new(period.as_millis() as u32, move || page.fetch_now())
    }
}

/// Start polling and wire visibility and composer listeners.
pub fn start(page: &Page, thread: Rc<ThreadPage>) -> Result<(), JsValue> {
    let poll = Rc::new(RefCell::new(PollLoop::new(
        IntervalScheduler {
            page: Rc::clone(&thread),
        },
        POLL_INTERVAL,
    )));

    if poll.borrow_mut().start() {
        thread.fetch_now();
    }

    {
        let poll = Rc::clone(&poll);
        let thread = Rc::clone(&thread);
        let document = page.document.clone();
        dom::listen(&page.document, "visibilitychange", move |_| {
            let visibility = if document.hidden() {
                Visibility::Hidden
            } else {
                Visibility::Visible
            };
            let fetch = poll.borrow_mut().on_visibility(visibility);
            if fetch {
                thread.fetch_now();
            }
        })?;
    }

    if let Some(composer) = dom::query("[data-contact-composer]") {
        let poll = Rc::clone(&poll);
        dom::listen(&composer, "submit", move |_| {
            poll.borrow_mut().on_composer_submit();
        })?;
    }

    Ok(())
}
