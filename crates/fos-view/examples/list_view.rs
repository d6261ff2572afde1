//! Example: a list whose items remove themselves
//!
//! Run with `RUST_LOG=fos_view=trace` to watch names resolve and caches fill.

use fos_view::{Content, Document, ElementNames, ElementsView, NameTable};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<html><body>
    <ul class="list">
        <li class="list__item" data-item-number="1">First</li>
        <li class="list__item" data-item-number="2">Second</li>
        <li class="list__item" data-item-number="3">Third</li>
    </ul>
    <button class="list__remove-item-button" data-item-number="1">Remove first</button>
    <button class="list__remove-item-button" data-item-number="2">Remove second</button>
    <button class="list__remove-item-button" data-item-number="3">Remove third</button>
</body></html>"#;

struct ListNames;

impl ElementNames for ListNames {
    fn selectors(&self) -> NameTable {
        let removing_button = ".list__remove-item-button";
        NameTable::new()
            .with("itemByNumber", ".list__item[data-item-number=%s]")
            .with("removingButton", removing_button)
            .with("removingButtonByNumber", format!("{removing_button}[data-item-number=%s]"))
    }
}

struct ListView {
    elements: ElementsView<ListNames>,
}

impl ListView {
    fn new(doc: &Document) -> Self {
        let mut elements = ElementsView::new(ListNames);
        elements.set_root(doc, doc.body());
        Self { elements }
    }

    /// What a click on the n-th removing button does
    fn on_removing_button_click(&mut self, doc: &mut Document, index: usize) -> anyhow::Result<()> {
        let buttons = self.elements.element(&*doc, "removingButton")?;
        let Some(button) = buttons.get(index) else {
            anyhow::bail!("no removing button #{index}");
        };
        let number = doc
            .tree()
            .get_attribute(button, "data-item-number")
            .and_then(|raw| raw.parse::<u32>().ok())
            .ok_or_else(|| anyhow::anyhow!("button #{index} has no item number"))?;
        self.remove_item(doc, number)
    }

    fn remove_item(&mut self, doc: &mut Document, number: u32) -> anyhow::Result<()> {
        self.elements
            .replace_element(doc, ("itemByNumber", [number]), Content::Nodes(Vec::new()))?;
        self.elements
            .replace_element(doc, ("removingButtonByNumber", [number]), Content::Nodes(Vec::new()))?;
        self.elements.drop_element_cache("removingButton");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = fos_html::parse(PAGE)?;
    let mut list = ListView::new(&doc);

    list.on_removing_button_click(&mut doc, 1)?;

    let remaining = list.elements.find_element(&doc, "removingButton")?;
    println!("{} items left", remaining.len());
    for button in remaining.iter() {
        println!("  {}", doc.tree().text_content(button));
    }
    Ok(())
}
