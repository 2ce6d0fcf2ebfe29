//! Demo navigation states and the factory that turns them into panels.

use crate::display::DisplayContext;
use crate::element::ViewKind;
use crate::factory::ViewFactory;
use crate::input::Screen;
use crate::render::ui::Panel;
use crate::token::StateToken;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    Home,
    Inbox,
    Detail,
    Settings,
    Dialog,
}

impl DemoKind {
    pub const ALL: [DemoKind; 5] = [
        DemoKind::Home,
        DemoKind::Inbox,
        DemoKind::Detail,
        DemoKind::Settings,
        DemoKind::Dialog,
    ];
}

impl From<Screen> for DemoKind {
    fn from(screen: Screen) -> Self {
        match screen {
            Screen::Home => DemoKind::Home,
            Screen::Inbox => DemoKind::Inbox,
            Screen::Detail => DemoKind::Detail,
            Screen::Settings => DemoKind::Settings,
            Screen::Dialog => DemoKind::Dialog,
        }
    }
}

/// One entry of the demo navigation stack.
///
/// Every push creates a new token, so pushing the same screen twice renders twice.
#[derive(Debug)]
pub struct DemoToken {
    kind: DemoKind,
    serial: u64,
}

impl DemoToken {
    pub fn new(kind: DemoKind, serial: u64) -> Arc<Self> {
        Arc::new(Self { kind, serial })
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn title(&self) -> String {
        match self.kind {
            DemoKind::Home => "Home".to_string(),
            DemoKind::Inbox => "Inbox".to_string(),
            DemoKind::Detail => format!("Message {}", self.serial),
            DemoKind::Settings => "Settings".to_string(),
            DemoKind::Dialog => "Confirm".to_string(),
        }
    }
}

impl StateToken for DemoToken {
    type Kind = DemoKind;

    fn kind(&self) -> DemoKind {
        self.kind
    }
}

/// Builds a [`Panel`] for each demo state.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoViewFactory;

impl ViewFactory<DemoToken, Panel> for DemoViewFactory {
    fn kind_for(&self, token: &DemoToken) -> ViewKind {
        match token.kind {
            DemoKind::Home => ViewKind::new("home"),
            DemoKind::Inbox => ViewKind::new("inbox"),
            DemoKind::Detail => ViewKind::new("detail"),
            DemoKind::Settings => ViewKind::new("settings"),
            DemoKind::Dialog => ViewKind::new("dialog"),
        }
    }

    fn create_for(&self, token: &Arc<DemoToken>, context: &DisplayContext) -> Panel {
        let theme = &context.theme;
        let panel = Panel::new(token.title(), theme.accent);
        match token.kind {
            DemoKind::Home => panel
                .with_line("h home   i inbox   d detail   s settings   o dialog")
                .with_line("b back   space burst of five   c clear all   q quit"),
            DemoKind::Inbox => (1..=4).fold(panel, |panel, n| {
                panel.with_line(format!("  {n}. unread message (press d to open)"))
            }),
            DemoKind::Detail => panel
                .with_line(format!("Message body for entry {}", token.serial))
                .with_line(format!(
                    "Laid out for a {}x{} surface",
                    context.area.width, context.area.height
                )),
            DemoKind::Settings => panel
                .with_line("Transitions follow the configured strategy.")
                .with_line("Run with --strategy direct to swap instantly."),
            DemoKind::Dialog => {
                let mut panel = panel
                    .with_line("Discard changes?")
                    .with_line("b to dismiss")
                    .overlay();
                panel.accent = theme.error_text;
                panel
            }
        }
    }

    fn is_opaque(&self, token: &DemoToken) -> bool {
        token.kind != DemoKind::Dialog
    }
}
