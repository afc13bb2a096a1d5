use griddom::{hit_test, layout, Element, Event, MouseButton, Rect, Visibility};

fn header() -> Element {
    Element::table().id("head").child(
        Element::tr()
            .child(
                Element::th()
                    .id("a")
                    .draggable(true)
                    .child(Element::text("Alpha")),
            )
            .child(
                Element::th()
                    .id("b")
                    .draggable(true)
                    .child(Element::text("Beta")),
            )
            .child(Element::th().id("plain").child(Element::text("x"))),
    )
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_finds_draggable_cell() {
    let root = header();
    let layout = layout(&root, Rect::new(0, 0, 800, 600));

    // "Alpha" = 5 * 8 + 8 = 48 wide; "Beta" starts at 48.
    assert_eq!(hit_test(&layout, &root, 10, 5), Some("a".to_string()));
    assert_eq!(hit_test(&layout, &root, 50, 5), Some("b".to_string()));
}

#[test]
fn test_hit_test_ignores_plain_and_outside() {
    let root = header();
    let layout = layout(&root, Rect::new(0, 0, 800, 600));

    // "Beta" = 40 wide, so "plain" starts at 88.
    assert_eq!(hit_test(&layout, &root, 90, 5), None);
    assert_eq!(hit_test(&layout, &root, 500, 500), None);
}

#[test]
fn test_hit_test_skips_invisible_elements() {
    let mut root = header();
    root.find_by_id_mut("a").unwrap().style.visibility = Visibility::Hidden;
    let layout = layout(&root, Rect::new(0, 0, 800, 600));

    assert_eq!(hit_test(&layout, &root, 10, 5), None);
}

// ============================================================================
// Event Helpers
// ============================================================================

#[test]
fn test_event_target() {
    let event = Event::click("menu-owner");
    assert_eq!(event.target(), Some("menu-owner"));
    assert!(matches!(
        event,
        Event::Click {
            button: MouseButton::Left,
            ..
        }
    ));
    assert_eq!(Event::Drag { x: 1, y: 2 }.target(), None);
}
