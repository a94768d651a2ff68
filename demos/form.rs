//! Form Demo - Two bound inputs and a computed full name.
//!
//! The full bootstrap flow: observables, a computed, a registry, a document
//! with bound elements, one `bind` call, then an event loop routing terminal
//! keys into the document. Type into a field and watch the other side of the
//! binding move; Tab switches fields; Esc quits.
//!
//! Run with: cargo run --example form

use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use tether_tui::binding::{BIND_ATTR, Registry, bind};
use tether_tui::document::Document;
use tether_tui::reactive::{computed, observable};
use tether_tui::state::{Key, poll_key, route_key};

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Values.
    let first = observable("John".to_string());
    let last = observable("Smith".to_string());
    let full = computed(
        {
            let (first, last) = (first.clone(), last.clone());
            move || format!("{} {}", first.get(), last.get()).trim().to_string()
        },
        &[&first, &last],
    );

    // Registry.
    let mut registry = Registry::new();
    registry.insert("firstName", first);
    registry.insert("lastName", last);
    registry.insert("fullName", full.clone());

    // Document: two editable fields, one read-only display.
    let doc = Document::new();
    doc.create_input("first").set_attr(BIND_ATTR, "firstName");
    doc.create_input("last").set_attr(BIND_ATTR, "lastName");
    doc.create_input("full").set_attr(BIND_ATTR, "fullName");

    let session = bind(&doc, &registry).expect("bindings are wired in setup");
    println!("{} bindings active. Tab switches fields, Esc quits.\r", session.len());

    doc.focus("first");
    render(&doc);

    enable_raw_mode()?;
    let result = event_loop(&doc);
    disable_raw_mode()?;

    println!();
    result
}

fn event_loop(doc: &Document) -> std::io::Result<()> {
    loop {
        let Some(event) = poll_key(Duration::from_millis(16))? else {
            continue;
        };
        if event.key == Key::Escape {
            return Ok(());
        }
        match route_key(doc, &event) {
            Ok(consumed) => {
                if consumed {
                    render(doc);
                }
            }
            // Typing into the read-only full-name field lands here.
            Err(err) => {
                print!("\r\x1b[2K{err}");
                stdout().flush()?;
            }
        }
    }
}

fn render(doc: &Document) {
    let focused = doc.focused().map(|e| e.id().to_string());
    let mut line = String::new();
    for element in doc.elements() {
        let marker = if focused.as_deref() == Some(element.id()) {
            '>'
        } else {
            ' '
        };
        line.push_str(&format!("{}{}: [{}]  ", marker, element.id(), element.value()));
    }
    print!("\r\x1b[2K{line}");
    let _ = stdout().flush();
}
