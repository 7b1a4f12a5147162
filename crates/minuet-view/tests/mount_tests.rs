//! End-to-end tests: build a host tree, mount an app, drive it through
//! data writes and simulated events, and observe the rendered output.

use serde_json::json;

use minuet_dom::{to_html, Node};
use minuet_view::App;

#[test]
fn test_interpolation_renders_and_re_renders() {
	let message = Node::text_node("{{x}} and {{y}}");
	let root = Node::element("div").with_child(message.clone());

	let app = App::builder()
		.data(json!({"x": 1, "y": 2}))
		.mount(&root)
		.unwrap();

	assert_eq!(message.text(), "1 and 2");

	app.set("y", json!(9)).unwrap();
	assert_eq!(message.text(), "1 and 9");
}

#[test]
fn test_v_text_directive_tracks_deep_paths() {
	let heading = Node::element("h1").with_attr("v-text", "{{ user.name }}");
	let root = Node::element("div").with_child(heading.clone());

	let app = App::builder()
		.data(json!({"user": {"name": "ada"}}))
		.mount(&root)
		.unwrap();

	assert_eq!(heading.text(), "ada");

	app.set("user.name", json!("grace")).unwrap();
	assert_eq!(heading.text(), "grace");

	// Replacing the whole parent re-renders dependents of the leaf too.
	app.set("user", json!({"name": "lin"})).unwrap();
	assert_eq!(heading.text(), "lin");
}

#[test]
fn test_v_html_writes_markup_verbatim() {
	let pane = Node::element("div").with_attr("v-html", "body");
	let root = Node::element("main").with_child(pane.clone());

	let app = App::builder()
		.data(json!({"body": "<b>bold</b>"}))
		.mount(&root)
		.unwrap();

	assert_eq!(pane.markup(), Some("<b>bold</b>".to_string()));
	assert!(to_html(&pane).contains("<b>bold</b>"));

	app.set("body", json!("<i>italic</i>")).unwrap();
	assert_eq!(pane.markup(), Some("<i>italic</i>".to_string()));
}

#[test]
fn test_v_model_round_trips_user_input() {
	let field = Node::element("input").with_attr("v-model", "user.name");
	let label = Node::text_node("hello, {{ user.name }}");
	let root = Node::element("form")
		.with_child(field.clone())
		.with_child(label.clone());

	let app = App::builder()
		.data(json!({"user": {"name": "ada"}}))
		.mount(&root)
		.unwrap();

	// Initial paint in both directions of the binding.
	assert_eq!(field.value(), "ada");
	assert_eq!(label.text(), "hello, ada");

	// Data write reaches the field.
	app.set("user.name", json!("grace")).unwrap();
	assert_eq!(field.value(), "grace");

	// User input reaches the data and every sibling binding, synchronously.
	field.simulate_input("lin");
	assert_eq!(app.get("user.name").unwrap(), json!("lin"));
	assert_eq!(label.text(), "hello, lin");
}

#[test]
fn test_v_on_dispatches_to_named_method() {
	let button = Node::element("button").with_attr("v-on:click", "bump");
	let counter = Node::text_node("count: {{ count }}");
	let root = Node::element("div")
		.with_child(button.clone())
		.with_child(counter.clone());

	let app = App::builder()
		.data(json!({"count": 0}))
		.method("bump", |app, _event| {
			let count = app.get("count").ok().and_then(|v| v.as_i64()).unwrap_or(0);
			app.set("count", json!(count + 1)).unwrap();
		})
		.mount(&root)
		.unwrap();

	assert_eq!(counter.text(), "count: 0");

	button.simulate_click();
	button.simulate_click();
	// The method ran and its write re-rendered before simulate_click returned.
	assert_eq!(counter.text(), "count: 2");
	assert_eq!(app.get("count").unwrap(), json!(2));
}

#[test]
fn test_v_on_with_unknown_method_is_tolerated() {
	let button = Node::element("button").with_attr("v-on:click", "missing");
	let root = Node::element("div").with_child(button.clone());

	let app = App::builder().data(json!({"count": 0})).mount(&root).unwrap();

	button.simulate_click();
	assert_eq!(app.get("count").unwrap(), json!(0));
}

#[test]
fn test_unknown_directive_does_not_break_the_mount() {
	let para = Node::element("p")
		.with_attr("v-if", "count")
		.with_attr("v-text", "{{ count }}");
	let root = Node::element("div").with_child(para.clone());

	let app = App::builder().data(json!({"count": 3})).mount(&root).unwrap();

	assert_eq!(para.text(), "3");
	app.set("count", json!(4)).unwrap();
	assert_eq!(para.text(), "4");
}

#[test]
fn test_computed_property_feeds_bindings() {
	let badge = Node::element("span").with_attr("v-text", "{{ full_name }}");
	let root = Node::element("div").with_child(badge.clone());

	let app = App::builder()
		.data(json!({"first": "ada", "last": "lovelace"}))
		.computed("full_name", |scope| {
			let first = scope.get("first").unwrap_or(json!(""));
			let last = scope.get("last").unwrap_or(json!(""));
			json!(format!(
				"{} {}",
				first.as_str().unwrap_or(""),
				last.as_str().unwrap_or("")
			))
		})
		.mount(&root)
		.unwrap();

	assert_eq!(badge.text(), "ada lovelace");

	// A write to either underlying key re-evaluates the derived value.
	app.set("first", json!("grace")).unwrap();
	assert_eq!(badge.text(), "grace lovelace");

	app.set("last", json!("hopper")).unwrap();
	assert_eq!(badge.text(), "grace hopper");
}

#[test]
fn test_idempotent_write_does_not_re_render() {
	let counter = Node::text_node("{{ n }}");
	let root = Node::element("div").with_child(counter.clone());

	let app = App::builder().data(json!({"n": 5})).mount(&root).unwrap();

	// Count re-renders through a second watcher on the same path.
	let renders = std::rc::Rc::new(std::cell::Cell::new(0));
	let seen = renders.clone();
	let _probe = app
		.graph()
		.watch("n".parse().unwrap(), move |_, _| seen.set(seen.get() + 1))
		.unwrap();

	app.set("n", json!(5)).unwrap();
	assert_eq!(renders.get(), 0);

	app.set("n", json!(6)).unwrap();
	assert_eq!(renders.get(), 1);
	assert_eq!(counter.text(), "6");
}

#[test]
fn test_dropping_the_app_tears_all_bindings_down() {
	let message = Node::text_node("{{ status }}");
	let button = Node::element("button").with_attr("v-on:click", "noop");
	let root = Node::element("div")
		.with_child(message.clone())
		.with_child(button.clone());

	let app = App::builder()
		.data(json!({"status": "live"}))
		.method("noop", |_, _| {})
		.mount(&root)
		.unwrap();
	assert_eq!(message.text(), "live");

	let graph = app.graph().clone();
	drop(app);

	// The graph survives independently, but nothing listens any more.
	graph.set(&"status".parse().unwrap(), json!("gone")).unwrap();
	assert_eq!(message.text(), "live");
	assert_eq!(graph.watcher_count(), 0);

	// Stale click listeners fire into a dead dispatcher.
	button.simulate_click();
}

#[test]
fn test_counter_form_scenario() {
	// The classic demo: an input bound to a name, a computed greeting,
	// and a reset button, all on one tree.
	let field = Node::element("input").with_attr("v-model", "name");
	let greeting = Node::element("p").with_attr("v-text", "{{ greeting }}");
	let reset = Node::element("button").with_attr("v-on:click", "reset");
	let root = Node::element("form")
		.with_child(field.clone())
		.with_child(greeting.clone())
		.with_child(reset.clone());

	let app = App::builder()
		.data(json!({"name": "world"}))
		.computed("greeting", |scope| {
			let name = scope.get("name").unwrap_or(json!(""));
			json!(format!("hello, {}!", name.as_str().unwrap_or("")))
		})
		.method("reset", |app, _event| {
			app.set("name", json!("world")).unwrap();
		})
		.mount(&root)
		.unwrap();

	assert_eq!(greeting.text(), "hello, world!");

	field.simulate_input("minuet");
	assert_eq!(greeting.text(), "hello, minuet!");
	assert_eq!(app.get("name").unwrap(), json!("minuet"));

	reset.simulate_click();
	assert_eq!(greeting.text(), "hello, world!");
	assert_eq!(field.value(), "world");
}
