use contextual_core::{
    widget::{ContextArea, Clickable, Constraints, Dimensions},
    Buttons, Color, Context, DisplayList, Point, PointerInput, Rect, Size, Window
};
use proptest::prelude::*;

const VIEWPORT: Size = Size::new(800f32, 600f32);
const ITEM: Size = Size::new(100f32, 30f32);
const REGION: Size = Size::new(400f32, 300f32);

struct Page {
    area: ContextArea,
    item: Clickable
}

impl Page {
    fn new() -> Self {
        Self {
            area: ContextArea::new(),
            item: Clickable::new()
        }
    }

    fn layout(&mut self, ctx: &mut Context) -> Dimensions {
        let item = &mut self.item;

        ctx.with_constraints(Constraints::tight(REGION), |ctx| {
            self.area.layout(ctx, |ctx| {
                item.layout(ctx, |ctx| {
                    ctx.ops.fill(Rect::from_size(ITEM), Color::rgb(30, 30, 30));

                    Dimensions::new(ITEM)
                })
            })
        })
    }

    fn frame(&mut self, window: &mut Window) -> DisplayList {
        window.frame(|ctx| self.layout(ctx))
    }
}

fn open_at(window: &mut Window, page: &mut Page, pos: Point) {
    window.pointer(PointerInput::press(pos, Buttons::SECONDARY));
    window.pointer(PointerInput::release(pos));
    page.frame(window);

    assert!(page.area.active());
    assert!(page.area.activated());
}

#[test]
fn scenario_c_release_on_overlay_dismisses_after_item_click() {
    let mut window = Window::new(VIEWPORT);
    let mut page = Page::new();

    page.frame(&mut window);
    open_at(&mut window, &mut page, Point::new(100f32, 100f32));

    window.pointer(PointerInput::press((120f32, 110f32), Buttons::PRIMARY));
    page.frame(&mut window);
    assert!(page.area.active());
    assert!(page.item.pressed());

    window.pointer(PointerInput::release((120f32, 110f32)));
    let list = page.frame(&mut window);

    assert!(!page.area.active());
    assert!(page.area.dismissed());
    assert!(!page.area.dismissed());
    assert!(page.item.clicked());
    // The item was laid out to see the click but is no longer drawn.
    assert!(list.items.is_empty());
}

#[test]
fn scenario_c_click_within_a_single_frame() {
    let mut window = Window::new(VIEWPORT);
    let mut page = Page::new();

    page.frame(&mut window);
    open_at(&mut window, &mut page, Point::new(100f32, 100f32));

    window.pointer(PointerInput::press((150f32, 120f32), Buttons::PRIMARY));
    window.pointer(PointerInput::release((150f32, 120f32)));
    page.frame(&mut window);

    assert!(page.area.dismissed());
    assert!(page.item.clicked());
}

#[test]
fn scenario_d_press_on_suppression_scrim_dismisses_once() {
    let mut window = Window::new(VIEWPORT);
    let mut page = Page::new();

    page.frame(&mut window);
    open_at(&mut window, &mut page, Point::new(50f32, 50f32));

    window.pointer(PointerInput::press((700f32, 500f32), Buttons::PRIMARY));
    window.pointer(PointerInput::release((700f32, 500f32)));
    page.frame(&mut window);

    assert!(!page.area.active());
    assert!(page.area.dismissed());
    assert!(!page.item.clicked());

    window.pointer(PointerInput::press((700f32, 500f32), Buttons::PRIMARY));
    window.pointer(PointerInput::release((700f32, 500f32)));
    page.frame(&mut window);

    assert!(!page.area.active());
    assert!(!page.area.dismissed());
    assert!(!page.area.activated());
}

#[test]
fn secondary_press_on_scrim_dismisses_instead_of_reopening() {
    let mut window = Window::new(VIEWPORT);
    let mut page = Page::new();

    page.frame(&mut window);
    open_at(&mut window, &mut page, Point::new(50f32, 50f32));

    window.pointer(PointerInput::press((300f32, 250f32), Buttons::SECONDARY));
    page.frame(&mut window);

    assert!(!page.area.active());
    assert!(page.area.dismissed());
    assert!(!page.area.activated());
}

#[test]
fn overlay_is_drawn_above_page_content() {
    let mut window = Window::new(VIEWPORT);
    let mut page = Page::new();

    page.frame(&mut window);
    window.pointer(PointerInput::press((10f32, 10f32), Buttons::SECONDARY));

    let list = window.frame(|ctx| {
        page.layout(ctx);
        ctx.ops.fill(Rect::from_size(VIEWPORT), Color::WHITE);

        Dimensions::new(VIEWPORT)
    });

    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].color, Color::WHITE);
    assert_eq!(list.items[1].transform.apply(Point::ZERO), Point::new(10f32, 10f32));
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Press(Point, Buttons),
    Release(Point)
}

fn point() -> impl Strategy<Value = Point> {
    (0f32..800f32, 0f32..600f32).prop_map(|(x, y)| Point::new(x, y))
}

fn step() -> impl Strategy<Value = Step> {
    let buttons = prop_oneof![
        Just(Buttons::PRIMARY),
        Just(Buttons::SECONDARY),
        Just(Buttons::TERTIARY),
        Just(Buttons::PRIMARY | Buttons::SECONDARY)
    ];

    prop_oneof![
        (point(), buttons).prop_map(|(p, b)| Step::Press(p, b)),
        point().prop_map(Step::Release)
    ]
}

proptest! {
    #[test]
    fn transitions_match_observed_state_changes(steps in prop::collection::vec(step(), 1..40)) {
        let mut window = Window::new(VIEWPORT);
        let mut page = Page::new();
        page.frame(&mut window);

        for step in steps {
            let before = page.area.active();

            match step {
                Step::Press(pos, buttons) => window.pointer(PointerInput::press(pos, buttons)),
                Step::Release(pos) => window.pointer(PointerInput::release(pos))
            }
            page.frame(&mut window);

            let after = page.area.active();
            prop_assert_eq!(page.area.activated(), !before && after);
            prop_assert_eq!(page.area.dismissed(), before && !after);
            prop_assert!(!page.area.activated());
            prop_assert!(!page.area.dismissed());
        }
    }
}
