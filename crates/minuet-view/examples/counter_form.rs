//! A small end-to-end demo: a name field, a derived greeting and a couple
//! of buttons, driven entirely by simulated events.
//!
//! Run with: `cargo run --example counter_form`

use anyhow::Result;
use serde_json::json;

use minuet_dom::{Node, to_html};
use minuet_view::App;

fn main() -> Result<()> {
	tracing_subscriber::fmt::init();

	let name_field = Node::element("input")
		.with_attr("type", "text")
		.with_attr("v-model", "name");
	let greeting = Node::element("p").with_attr("v-text", "hello, {{ name }}! clicks: {{ clicks }}");
	let bump = Node::element("button").with_attr("v-on:click", "bump");
	let reset = Node::element("button").with_attr("v-on:click", "reset");

	let root = Node::element("form")
		.with_child(name_field.clone())
		.with_child(greeting.clone())
		.with_child(bump.clone())
		.with_child(reset.clone());

	let app = App::builder()
		.data(json!({ "name": "world", "clicks": 0 }))
		.method("bump", |app, _event| {
			let n = app.get("clicks").ok().and_then(|v| v.as_i64()).unwrap_or(0);
			let _ = app.set("clicks", json!(n + 1));
		})
		.method("reset", |app, _event| {
			let _ = app.set("name", json!("world"));
			let _ = app.set("clicks", json!(0));
		})
		.mount(&root)?;

	println!("after mount:\n{}\n", to_html(&root));

	name_field.simulate_input("minuet");
	bump.simulate_click();
	bump.simulate_click();
	println!("after typing and two clicks:\n{}\n", to_html(&root));
	println!("data: {}", app.graph().snapshot());

	reset.simulate_click();
	println!("\nafter reset:\n{}", to_html(&root));

	Ok(())
}
