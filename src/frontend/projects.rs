use super::{document, listen};
use crate::cards::{CardMedia, ProjectCardView, CARD_COLUMN_CLASS, CARD_ITEM_SELECTOR};
use crate::config::UiConfig;
use crate::logging::EventLog;
use crate::paginator::{
    load_more, page_url, PageFailure, PagerSurface, Paginator, ProjectSource, ProjectsPage,
    CURRENT_PAGE_ATTRIBUTE, ERROR_CLASS, EXHAUSTED_LABEL,
};
use crate::request::RequestFailure;
use gloo_net::http::Request;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, MouseEvent};
use yew::prelude::*;

const LOAD_MORE_ID: &str = "load-more-projects";
const GRID_ID: &str = "featured-projects-grid";
const HINT_ID: &str = "load-more-hint";
const DEFAULT_TEXT_SELECTOR: &str = ".default-text";
const LOADING_TEXT_SELECTOR: &str = ".loading-text";
const HIDDEN_CLASS: &str = "d-none";

struct FetchProjectSource {
    endpoint: String,
}

impl ProjectSource for FetchProjectSource {
    async fn fetch_page(&self, page: u32) -> Result<ProjectsPage, RequestFailure> {
        let response = Request::get(&page_url(&self.endpoint, page))
            .send()
            .await
            .map_err(|error| RequestFailure::Network(error.to_string()))?;

        response
            .json::<ProjectsPage>()
            .await
            .map_err(|error| RequestFailure::Decode(error.to_string()))
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    card: ProjectCardView,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let card = &props.card;

    let media = match &card.media {
        CardMedia::Image { src, alt } => html! {
            <img src={src.clone()} class="card-img-top project-image" alt={alt.clone()} loading="lazy" />
        },
        CardMedia::Placeholder => html! {
            <div
                class="card-img-top bg-primary d-flex align-items-center justify-content-center text-white project-placeholder"
                style="height:200px"
            >
                <i class="fas fa-laptop-code fa-2x"></i>
            </div>
        },
    };

    html! {
        <div class="project-card card h-100 border-0 shadow-sm">
            <div class="project-image-wrapper position-relative overflow-hidden">
                {media}
                <div class="project-overlay position-absolute top-0 start-0 w-100 h-100 d-flex align-items-center justify-content-center">
                    <div class="overlay-actions">
                        <a href={card.detail_href.clone()} class="btn btn-light btn-sm me-2">
                            <i class="fas fa-eye"></i>
                        </a>
                        if let Some(live_url) = card.live_url.clone() {
                            <a href={live_url} target="_blank" rel="noopener noreferrer" class="btn btn-primary btn-sm">
                                <i class="fas fa-external-link-alt"></i>
                            </a>
                        }
                    </div>
                </div>
            </div>
            <div class="card-body d-flex flex-column">
                <h5 class="card-title">{card.title.clone()}</h5>
                <p class="card-text flex-grow-1">{card.description.clone()}</p>
                <div class="technologies mb-3">
                    { for card.badges.iter().map(|badge| html! {
                        <span class="badge bg-primary me-1 mb-1">{badge.clone()}</span>
                    }) }
                    if let Some(overflow) = card.overflow_label() {
                        <span class="badge bg-secondary">{overflow}</span>
                    }
                </div>
                <div class="card-actions d-flex gap-2">
                    <a href={card.detail_href.clone()} class="btn btn-outline-primary btn-sm flex-grow-1">
                        <i class="fas fa-eye me-1"></i>{"View Details"}
                    </a>
                    if let Some(live_url) = card.live_url.clone() {
                        <a href={live_url} class="btn btn-success btn-sm" target="_blank" rel="noopener noreferrer">
                            <i class="fas fa-external-link-alt"></i>
                        </a>
                    }
                </div>
                <small class="text-muted mt-2">
                    <i class="fas fa-calendar me-1"></i>{card.created_label.clone()}
                </small>
            </div>
        </div>
    }
}

struct DomPager {
    button: HtmlButtonElement,
    grid: Element,
    idle_markup: String,
}

impl DomPager {
    fn set_span_hidden(&self, selector: &str, hidden: bool) {
        if let Some(span) = self.button.query_selector(selector).ok().flatten() {
            let _ = span.class_list().toggle_with_force(HIDDEN_CLASS, hidden);
        }
    }
}

impl PagerSurface for DomPager {
    fn show_loading(&self) {
        // A failed attempt replaced the markup; put the label spans back first.
        if self.button.class_list().contains(ERROR_CLASS) {
            let _ = self.button.class_list().remove_1(ERROR_CLASS);
            self.button.set_inner_html(&self.idle_markup);
        }
        self.set_span_hidden(DEFAULT_TEXT_SELECTOR, true);
        self.set_span_hidden(LOADING_TEXT_SELECTOR, false);
    }

    fn store_current_page(&self, page: u32) {
        let _ = self
            .grid
            .set_attribute(CURRENT_PAGE_ATTRIBUTE, &page.to_string());
    }

    fn append_cards(&self, cards: &[ProjectCardView]) -> usize {
        if let Some(document) = document() {
            for card in cards {
                let Ok(column) = document.create_element("div") else {
                    continue;
                };
                column.set_class_name(CARD_COLUMN_CLASS);
                if self.grid.append_child(&column).is_ok() {
                    yew::Renderer::<ProjectCard>::with_root_and_props(
                        column,
                        ProjectCardProps { card: card.clone() },
                    )
                    .render();
                }
            }
        }

        self.grid
            .query_selector_all(CARD_ITEM_SELECTOR)
            .map(|items| items.length() as usize)
            .unwrap_or(0)
    }

    fn set_count_hint(&self, text: &str) {
        if let Some(hint) = document().and_then(|d| d.get_element_by_id(HINT_ID)) {
            hint.set_text_content(Some(text));
        }
    }

    fn mark_exhausted(&self) {
        self.button.set_disabled(true);
        self.button.set_inner_html(EXHAUSTED_LABEL);
    }

    fn mark_failed(&self, failure: PageFailure) {
        let _ = self.button.class_list().add_1(ERROR_CLASS);
        self.button.set_inner_html(&failure.markup());
    }

    fn restore_idle(&self) {
        self.set_span_hidden(DEFAULT_TEXT_SELECTOR, false);
        self.set_span_hidden(LOADING_TEXT_SELECTOR, true);
    }
}

pub(super) fn install(config: &UiConfig, log: EventLog) {
    let Some(document) = document() else {
        return;
    };
    let (Some(button), Some(grid)) = (
        document.get_element_by_id(LOAD_MORE_ID),
        document.get_element_by_id(GRID_ID),
    ) else {
        return;
    };
    let Ok(button) = button.dyn_into::<HtmlButtonElement>() else {
        return;
    };

    let pager = Rc::new(RefCell::new(Paginator::from_attribute(
        grid.get_attribute(CURRENT_PAGE_ATTRIBUTE).as_deref(),
    )));
    let surface = Rc::new(DomPager {
        idle_markup: button.inner_html(),
        button: button.clone(),
        grid,
    });
    let source = Rc::new(FetchProjectSource {
        endpoint: config.projects_endpoint.clone(),
    });

    listen(&button, "click", move |_: MouseEvent| {
        let pager = pager.clone();
        let surface = surface.clone();
        let source = source.clone();
        spawn_local(async move {
            load_more(&pager, &*source, &*surface, log).await;
        });
    });
}
