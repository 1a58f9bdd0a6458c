use contextual::{
    widget::{ContextArea, Clickable, Constraints, Dimensions, Padding},
    Color, Context, Point, Rect, Size
};

const ROWS: usize = 30;
const ROW_HEIGHT: f32 = 40f32;
const MENU_WIDTH: f32 = 200f32;
const ITEM_HEIGHT: f32 = 40f32;
const BORDER: f32 = 2f32;

const SURFACE: Color = Color::rgb(250, 250, 250);
const MENU_BACKGROUND: Color = Color::rgb(255, 255, 255);
const MENU_BORDER: Color = Color::rgba(0, 0, 0, 60);
const INK: Color = Color::rgb(60, 60, 60);
const DIVIDER: Color = Color::rgb(220, 220, 220);
const PRESSED: Color = Color::rgb(230, 230, 240);
const SELECTED: Color = Color::rgb(200, 200, 255);

/// A page demonstrating context menus: a region that can be
/// recolored through its right-click menu, and a list whose rows
/// each carry their own context menu.
pub struct Page {
    red: Clickable,
    green: Clickable,
    blue: Clickable,
    balance: Clickable,
    account: Clickable,
    cart: Clickable,
    left_fill: Color,
    left_area: ContextArea,
    rows: Vec<Row>,
    selected: Option<usize>,
    scroll: f32
}

#[derive(Default)]
struct Row {
    clickable: Clickable,
    area: ContextArea
}

impl Page {
    pub fn new() -> Self {
        Self {
            red: Clickable::new(),
            green: Clickable::new(),
            blue: Clickable::new(),
            balance: Clickable::new(),
            account: Clickable::new(),
            cart: Clickable::new(),
            left_fill: Color::TRANSPARENT,
            left_area: ContextArea::new(),
            rows: Vec::new(),
            selected: None,
            scroll: 0f32
        }
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn left_fill(&self) -> Color {
        self.left_fill
    }

    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether any context menu on the page is open.
    pub fn menu_open(&self) -> bool {
        self.left_area.active() || self.rows.iter().any(|row| row.area.active())
    }

    pub fn scroll_by(&mut self, delta: f32, viewport: Size) {
        let max = (ROWS as f32 * ROW_HEIGHT - viewport.height).max(0f32);
        self.scroll = (self.scroll + delta).clamp(0f32, max);
    }

    pub fn layout(&mut self, ctx: &mut Context) -> Dimensions {
        if self.red.clicked() {
            self.left_fill = Color::rgb(200, 0, 0);
        }

        if self.green.clicked() {
            self.left_fill = Color::rgb(0, 200, 0);
        }

        if self.blue.clicked() {
            self.left_fill = Color::rgb(0, 0, 200);
        }

        for (name, clickable) in [
            ("balance", &mut self.balance),
            ("account", &mut self.account),
            ("cart", &mut self.cart)
        ] {
            if clickable.clicked() {
                tracing::info!(item = name, "menu item chosen");
            }
        }

        let window = ctx.window_size();
        let half = Size::new((window.width / 2f32).floor(), window.height);

        ctx.with_constraints(Constraints::tight(half), |ctx| self.layout_left(ctx));
        ctx.offset(Point::new(half.width, 0f32), |ctx| {
            ctx.with_constraints(Constraints::tight(half), |ctx| self.layout_list(ctx))
        });

        Dimensions::new(window)
    }

    fn layout_left(&mut self, ctx: &mut Context) -> Dimensions {
        let size = ctx.constraints.min;

        ctx.ops.fill(Rect::from_size(size), Color::BLACK);
        ctx.ops.fill(
            Rect::new(BORDER, BORDER, size.width - BORDER * 2f32, size.height - BORDER * 2f32),
            if self.left_fill.is_visible() { self.left_fill } else { Color::WHITE }
        );

        Padding::from(24f32).layout(ctx, |ctx| {
            ctx.ops.fill(Rect::new(0f32, 0f32, 240f32, 48f32), SURFACE);
            label(ctx, Point::new(12f32, 18f32), 216f32);

            Dimensions::new(Size::new(240f32, 48f32))
        });

        let Self { red, green, blue, left_area, .. } = self;

        left_area.layout(ctx, |ctx| {
            menu(ctx, &mut [
                &mut |ctx: &mut Context| text_block(ctx, 3),
                &mut divider,
                &mut loader,
                &mut |ctx: &mut Context| subheading(ctx),
                &mut |ctx: &mut Context| menu_item(ctx, red, Color::rgb(200, 0, 0)),
                &mut |ctx: &mut Context| menu_item(ctx, green, Color::rgb(0, 200, 0)),
                &mut |ctx: &mut Context| menu_item(ctx, blue, Color::rgb(0, 0, 200))
            ])
        })
    }

    fn layout_list(&mut self, ctx: &mut Context) -> Dimensions {
        let size = ctx.constraints.min;

        if self.rows.len() < ROWS {
            self.rows.resize_with(ROWS, Row::default);
        }

        let Self { rows, balance, account, cart, selected, scroll, .. } = self;

        for (index, row) in rows.iter_mut().enumerate() {
            if row.clickable.clicked() || row.area.activated() {
                *selected = Some(index);
                tracing::info!(row = index, "row selected");
            }

            let is_selected = *selected == Some(index);
            let origin = Point::new(0f32, index as f32 * ROW_HEIGHT - *scroll);
            let row_size = Size::new(size.width, ROW_HEIGHT);

            ctx.offset(origin, |ctx| {
                ctx.with_constraints(Constraints::tight(row_size), |ctx| {
                    row.clickable.layout(ctx, |ctx| {
                        if is_selected {
                            ctx.ops.fill(Rect::from_size(row_size), SELECTED);
                        }

                        label(ctx, Point::new(8f32, 16f32), 60f32 + (index % 7) as f32 * 6f32);

                        if is_selected {
                            ctx.ops.fill(Rect::new(row_size.width - 24f32, 14f32, 12f32, 12f32), INK);
                        }

                        Dimensions::new(row_size)
                    });

                    row.area.layout(ctx, |ctx| {
                        menu(ctx, &mut [
                            &mut |ctx: &mut Context| menu_item(ctx, balance, Color::rgb(120, 90, 20)),
                            &mut |ctx: &mut Context| menu_item(ctx, account, Color::rgb(20, 90, 120)),
                            &mut |ctx: &mut Context| menu_item(ctx, cart, Color::rgb(90, 20, 120))
                        ])
                    })
                })
            });
        }

        Dimensions::new(size)
    }
}

impl Default for Page {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Stacks `options` vertically on a bordered surface.
fn menu(
    ctx: &mut Context,
    options: &mut [&mut dyn FnMut(&mut Context) -> Dimensions]
) -> Dimensions {
    let padding = Padding::new(8f32, 0f32, 8f32, 0f32);
    let constraints = Constraints::new(
        Size::new(MENU_WIDTH, 0f32),
        Size::new(MENU_WIDTH, f32::INFINITY)
    );

    let rec = ctx.ops.record();
    let mut height = padding.top;

    for option in options.iter_mut() {
        let dims = ctx.offset(Point::new(0f32, height), |ctx| {
            ctx.with_constraints(constraints, |ctx| option(ctx))
        });

        height += dims.size.height;
    }

    height += padding.bottom;
    let content = rec.stop(ctx.ops);

    let size = Size::new(MENU_WIDTH, height);
    ctx.ops.fill(
        Rect::new(-1f32, -1f32, size.width + 2f32, size.height + 2f32),
        MENU_BORDER
    );
    ctx.ops.fill(Rect::from_size(size), MENU_BACKGROUND);
    ctx.ops.call(content);

    Dimensions::new(size)
}

fn menu_item(ctx: &mut Context, clickable: &mut Clickable, swatch: Color) -> Dimensions {
    let size = Size::new(ctx.constraints.min.width, ITEM_HEIGHT);
    let pressed = clickable.pressed();

    clickable.layout(ctx, |ctx| {
        if pressed {
            ctx.ops.fill(Rect::from_size(size), PRESSED);
        }

        ctx.ops.fill(Rect::new(16f32, 12f32, 16f32, 16f32), swatch);
        label(ctx, Point::new(44f32, 16f32), 80f32);

        Dimensions::new(size)
    })
}

/// Stand-in for a line of text, drawn as a bar.
fn label(ctx: &mut Context, origin: Point, width: f32) {
    ctx.ops.fill(Rect::new(origin.x, origin.y, width, 8f32), INK);
}

fn text_block(ctx: &mut Context, lines: usize) -> Dimensions {
    let width = ctx.constraints.min.width;

    for line in 0..lines {
        label(ctx, Point::new(16f32, 4f32 + line as f32 * 16f32), width - 48f32 - line as f32 * 24f32);
    }

    Dimensions::new(Size::new(width, lines as f32 * 16f32 + 8f32))
}

fn divider(ctx: &mut Context) -> Dimensions {
    let width = ctx.constraints.min.width;
    ctx.ops.fill(Rect::new(0f32, 4f32, width, 1f32), DIVIDER);

    Dimensions::new(Size::new(width, 9f32))
}

fn loader(ctx: &mut Context) -> Dimensions {
    let width = ctx.constraints.min.width;
    ctx.ops.fill(Rect::new(16f32, 4f32, 24f32, 24f32), INK);

    Dimensions::new(Size::new(width, 32f32))
}

fn subheading(ctx: &mut Context) -> Dimensions {
    let dims = divider(ctx);
    label(ctx, Point::new(16f32, dims.size.height + 4f32), 48f32);

    Dimensions::new(Size::new(dims.size.width, dims.size.height + 19f32))
}
