//! Rendering of the catalog state into a small element tree.
//!
//! [`render`] is a pure function of the state. The resulting [`ViewNode`]
//! can be printed to a terminal with [`ViewNode::to_text`] or embedded in a
//! page with [`ViewNode::to_html`].

use crate::catalog::ViewState;
use crate::model::{Recipe, RecipeCollection};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub const TITLE: &str = "Recipe Catalog";
pub const REFRESH_LABEL: &str = "Refresh Recipes";
pub const REFRESHING_LABEL: &str = "Refreshing...";
pub const LOADING_LABEL: &str = "Loading recipes...";
pub const ERROR_HEADING: &str = "Failed to load";
pub const EMPTY_HEADING: &str = "No recipes found";
pub const EMPTY_HINT: &str = "Check that the API endpoint returns the expected structure.";
pub const NO_INGREDIENTS: &str = "No ingredient information.";
pub const NO_INSTRUCTIONS: &str = "No instructions available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    /// An empty value renders as a bare boolean attribute
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<ViewNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(ViewNode::Text(text.into()))
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

impl ViewNode {
    /// Concatenated text of this node and everything below it
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements carrying `class`, in document order
    pub fn find_all(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_class(class, &mut found);
        found
    }

    pub fn find(&self, class: &str) -> Option<&Element> {
        self.find_all(class).into_iter().next()
    }

    fn collect_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let ViewNode::Element(element) = self {
            if element.classes.iter().any(|c| *c == class) {
                found.push(element);
            }
            for child in &element.children {
                child.collect_class(class, found);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(&encode_text(text)),
            ViewNode::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", element.classes.join(" "));
                }
                for (name, value) in &element.attrs {
                    if value.is_empty() {
                        let _ = write!(out, " {}", name);
                    } else {
                        let _ = write!(
                            out,
                            " {}=\"{}\"",
                            name,
                            encode_double_quoted_attribute(value)
                        );
                    }
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Indented plain-text rendering for terminals
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(0, &mut out);
        out
    }

    fn write_text(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self {
            ViewNode::Text(text) => {
                for line in text.lines() {
                    let _ = writeln!(out, "{}{}", indent, line);
                }
            }
            ViewNode::Element(element) => match element.tag {
                "button" => {
                    let disabled = element.attrs.iter().any(|(name, _)| *name == "disabled");
                    let _ = writeln!(
                        out,
                        "{}[ {} ]{}",
                        indent,
                        self.text_content(),
                        if disabled { " (disabled)" } else { "" }
                    );
                }
                "li" => {
                    let _ = writeln!(out, "{}- {}", indent, self.text_content());
                }
                "h1" => {
                    let title = self.text_content();
                    let _ = writeln!(out, "{}{}", indent, title);
                    let _ = writeln!(out, "{}{}", indent, "=".repeat(title.chars().count()));
                }
                "h2" | "h3" | "h4" | "p" | "span" => {
                    let _ = writeln!(out, "{}{}", indent, self.text_content());
                }
                "article" | "ul" => {
                    for child in &element.children {
                        child.write_text(depth + 1, out);
                    }
                    if element.tag == "article" {
                        out.push('\n');
                    }
                }
                _ => {
                    for child in &element.children {
                        child.write_text(depth, out);
                    }
                }
            },
        }
    }
}

/// Render the whole catalog for `state`.
///
/// The header and refresh control are always present; the control is
/// disabled while a load is in flight.
pub fn render(state: &ViewState, endpoint: &str) -> ViewNode {
    Element::new("div")
        .class("catalog")
        .child(header(endpoint))
        .child(
            Element::new("section")
                .class("content")
                .child(toolbar(state.is_loading()))
                .children(content(state)),
        )
        .child(
            Element::new("footer")
                .class("footer")
                .child(Element::new("p").text("Rendered by recipe-catalog.")),
        )
        .into()
}

fn header(endpoint: &str) -> Element {
    Element::new("header")
        .class("header")
        .child(Element::new("h1").text(TITLE))
        .child(
            Element::new("p")
                .class("subtitle")
                .text("Loaded from the local server at ")
                .child(Element::new("code").text(endpoint)),
        )
}

fn toolbar(loading: bool) -> Element {
    let mut button = Element::new("button")
        .class("refresh")
        .attr("type", "button");
    button = if loading {
        button.class("spinning").attr("disabled", "").text(REFRESHING_LABEL)
    } else {
        button.text(REFRESH_LABEL)
    };
    Element::new("div").class("toolbar").child(button)
}

fn content(state: &ViewState) -> Vec<ViewNode> {
    match state {
        ViewState::Idle => Vec::new(),
        ViewState::Loading => vec![loading().into()],
        ViewState::Errored(message) => vec![alert(message).into()],
        ViewState::Loaded { recipes, advisory } => {
            let mut nodes: Vec<ViewNode> = Vec::new();
            if let Some(advisory) = advisory {
                nodes.push(alert(advisory).into());
            }
            nodes.push(recipe_grid(recipes).into());
            nodes
        }
    }
}

fn loading() -> Element {
    Element::new("div")
        .class("loading")
        .child(
            Element::new("span")
                .class("spinner")
                .attr("aria-hidden", "true")
                .text("⟳"),
        )
        .child(Element::new("p").text(LOADING_LABEL))
}

fn alert(message: &str) -> Element {
    Element::new("div")
        .class("alert")
        .attr("role", "alert")
        .child(Element::new("h3").text(ERROR_HEADING))
        .child(Element::new("p").class("message").text(message))
}

fn recipe_grid(recipes: &RecipeCollection) -> Element {
    if recipes.is_empty() {
        return Element::new("div")
            .class("empty")
            .child(Element::new("h3").text(EMPTY_HEADING))
            .child(Element::new("p").text(EMPTY_HINT));
    }

    Element::new("div")
        .class("grid")
        .children(recipes.iter().map(|(key, recipe)| ViewNode::from(card(key, recipe))))
}

fn card(key: &str, recipe: &Recipe) -> Element {
    let ingredients: Vec<ViewNode> = match &recipe.ingredients {
        Some(items) => items
            .iter()
            .map(|item| Element::new("li").text(item.as_str()).into())
            .collect(),
        None => vec![Element::new("li")
            .class("placeholder")
            .text(NO_INGREDIENTS)
            .into()],
    };
    let instructions = recipe
        .instructions
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(NO_INSTRUCTIONS);

    Element::new("article")
        .class("card")
        .attr("data-key", key)
        .child(
            Element::new("h2")
                .class("title")
                .text(recipe.display_title(key)),
        )
        .child(
            Element::new("div")
                .class("ingredients")
                .child(Element::new("h4").text("Ingredients"))
                .child(Element::new("ul").children(ingredients)),
        )
        .child(
            Element::new("div")
                .class("instructions")
                .child(Element::new("h4").text("Instructions"))
                .child(Element::new("p").text(instructions)),
        )
}
