//! Admin page composition
//!
//! Holds the transient UI state of the admin dashboard and turns a
//! [`PageDataPayload`] into the ordered widget tree the client renders.
//! Widgets never reach for globals: everything they may call back into is
//! carried by the [`PageContext`] handed to them.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::application::dto::page_data::{EnvironmentDto, PlayerDto};
use crate::application::dto::{DocumentHead, PlayerName};
use crate::application::ports::outbound::Connection;
use crate::application::services::PageDataPayload;
use crate::domain::value_objects::{DiceRoll, Toast};

pub const PAGE_TITLE: &str = "Painel do Administrador";
pub const EMPTY_ROSTER_MESSAGE: &str = "Não há nenhum jogador cadastrado.";
pub const DICE_CONTAINER_TITLE: &str = "Rolagem";
pub const GENERAL_DICE_CARD: &str = "Geral";
pub const ANNOTATIONS_TITLE: &str = "Anotações";

/// Published handle to the live connection; `None` until the room is joined
pub type SocketWatch = watch::Receiver<Option<Arc<dyn Connection>>>;

/// Append-only notification queue shared by every widget
#[derive(Clone, Default)]
pub struct ToastQueue {
    toasts: Arc<RwLock<Vec<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast; duplicates are kept
    pub fn push(&self, toast: Toast) {
        let mut toasts = self.toasts.write().unwrap_or_else(|e| e.into_inner());
        toasts.push(toast);
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Capabilities handed down to every widget
#[derive(Clone)]
pub struct PageContext {
    toasts: ToastQueue,
    socket: Option<Arc<dyn Connection>>,
}

impl PageContext {
    pub fn add_toast(&self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn socket(&self) -> Option<&Arc<dyn Connection>> {
        self.socket.as_ref()
    }

    /// Emit on the live connection if there is one.
    ///
    /// Transport failures become error toasts; returns whether the event left.
    pub fn emit(&self, event: &str, payload: Value) -> bool {
        let Some(socket) = &self.socket else {
            return false;
        };
        match socket.emit(event, payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to emit {}: {}", event, e);
                self.add_toast(Toast::error(e.to_string()));
                false
            }
        }
    }
}

/// Result shown by the dice roll result modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRollState {
    pub dices: DiceRoll,
    #[serde(rename = "resolverKey")]
    pub resolver_key: Option<String>,
}

impl Default for DiceRollState {
    fn default() -> Self {
        Self {
            dices: DiceRoll::empty(),
            resolver_key: None,
        }
    }
}

impl DiceRollState {
    /// State after the result modal is dismissed
    pub fn dismissed() -> Self {
        Self {
            dices: DiceRoll::empty(),
            resolver_key: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Navbar,
    Heading {
        text: String,
    },
    GlobalConfigurations {
        environment: Option<EnvironmentDto>,
    },
    PlayerManager {
        players: Vec<PlayerDto>,
    },
    EmptyRoster {
        message: String,
    },
    DiceRollContainer {
        title: String,
        cards: Vec<String>,
    },
    CombatContainer {
        players: Vec<PlayerName>,
    },
    DiceList {
        players: Vec<PlayerName>,
    },
    NpcContainer,
    Annotations {
        title: String,
        value: Option<String>,
    },
    GeneralDiceRollModal {
        show: bool,
    },
    DiceRollResultModal {
        show: bool,
        dices: DiceRoll,
        resolver_key: Option<String>,
    },
    ToastContainer {
        toasts: Vec<Toast>,
    },
}

/// Fully composed admin page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminPageView {
    pub head: DocumentHead,
    /// Whether a joined realtime connection backs the page
    pub live: bool,
    pub widgets: Vec<Widget>,
}

pub struct AdminPage {
    toasts: ToastQueue,
    general_dice_roll_show: bool,
    dice_roll: DiceRollState,
    socket: Option<SocketWatch>,
}

impl AdminPage {
    pub fn new(toasts: ToastQueue) -> Self {
        Self {
            toasts,
            general_dice_roll_show: false,
            dice_roll: DiceRollState::default(),
            socket: None,
        }
    }

    /// Follow the connection published by a room join coordinator
    pub fn with_socket(mut self, socket: SocketWatch) -> Self {
        self.socket = Some(socket);
        self
    }

    pub fn context(&self) -> PageContext {
        PageContext {
            toasts: self.toasts.clone(),
            socket: self
                .socket
                .as_ref()
                .and_then(|rx| rx.borrow().clone())
                .filter(|socket| !socket.is_closed()),
        }
    }

    pub fn open_general_dice_roll(&mut self) {
        self.general_dice_roll_show = true;
    }

    pub fn close_general_dice_roll(&mut self) {
        self.general_dice_roll_show = false;
    }

    pub fn show_dice_result(&mut self, dices: impl Into<DiceRoll>, resolver_key: Option<String>) {
        self.dice_roll = DiceRollState {
            dices: dices.into(),
            resolver_key,
        };
    }

    pub fn dismiss_dice_result(&mut self) {
        self.dice_roll = DiceRollState::dismissed();
    }

    pub fn dice_roll(&self) -> &DiceRollState {
        &self.dice_roll
    }

    pub fn compose(&self, payload: &PageDataPayload) -> AdminPageView {
        let context = self.context();
        let names = payload.player_names();

        let roster = if payload.players.is_empty() {
            Widget::EmptyRoster {
                message: EMPTY_ROSTER_MESSAGE.to_string(),
            }
        } else {
            Widget::PlayerManager {
                players: payload.players.iter().map(PlayerDto::from).collect(),
            }
        };

        let widgets = vec![
            Widget::Navbar,
            Widget::Heading {
                text: PAGE_TITLE.to_string(),
            },
            Widget::GlobalConfigurations {
                environment: payload.environment.as_ref().map(EnvironmentDto::from),
            },
            roster,
            Widget::DiceRollContainer {
                title: DICE_CONTAINER_TITLE.to_string(),
                cards: vec![GENERAL_DICE_CARD.to_string()],
            },
            Widget::CombatContainer {
                players: names.clone(),
            },
            Widget::DiceList { players: names },
            Widget::NpcContainer,
            Widget::Annotations {
                title: ANNOTATIONS_TITLE.to_string(),
                value: payload.notes.as_ref().map(|note| note.value.clone()),
            },
            Widget::GeneralDiceRollModal {
                show: self.general_dice_roll_show,
            },
            Widget::DiceRollResultModal {
                show: !self.dice_roll.dices.is_empty(),
                dices: self.dice_roll.dices.clone(),
                resolver_key: self.dice_roll.resolver_key.clone(),
            },
            Widget::ToastContainer {
                toasts: self.toasts.snapshot(),
            },
        ];

        AdminPageView {
            head: DocumentHead::new(Some(PAGE_TITLE)),
            live: context.socket().is_some(),
            widgets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EnvironmentConfig, Info, PlayerInfo, PlayerNote, PlayerRecord};
    use crate::domain::value_objects::{InfoId, ResolvedDice, ToastKind};

    fn scenario_payload() -> PageDataPayload {
        PageDataPayload {
            environment: Some(EnvironmentConfig::environment("forest")),
            players: vec![PlayerRecord::new("p1").with_info(PlayerInfo {
                info: Info {
                    id: InfoId::new("1"),
                    name: "Nome".to_string(),
                },
                value: "Aria".to_string(),
            })],
            notes: None,
        }
    }

    fn find<'a>(view: &'a AdminPageView, name: &str) -> Option<&'a Widget> {
        view.widgets.iter().find(|w| {
            serde_json::to_value(w).unwrap()["widget"] == serde_json::json!(name)
        })
    }

    #[test]
    fn test_empty_roster_shows_message() {
        let page = AdminPage::new(ToastQueue::new());
        let view = page.compose(&PageDataPayload::default());

        assert!(find(&view, "player_manager").is_none());
        assert_eq!(
            find(&view, "empty_roster"),
            Some(&Widget::EmptyRoster {
                message: EMPTY_ROSTER_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_roster_feeds_player_manager_and_names() {
        let page = AdminPage::new(ToastQueue::new());
        let view = page.compose(&scenario_payload());

        assert!(find(&view, "empty_roster").is_none());
        let expected = vec![PlayerName {
            id: "p1".to_string(),
            name: "Aria".to_string(),
        }];
        assert_eq!(
            find(&view, "combat_container"),
            Some(&Widget::CombatContainer {
                players: expected.clone()
            })
        );
        assert_eq!(find(&view, "dice_list"), Some(&Widget::DiceList { players: expected }));
        assert_eq!(view.head.title, "Painel do Administrador - Sunflower RPG");
        assert!(!view.live);
    }

    #[test]
    fn test_widget_order() {
        let view = AdminPage::new(ToastQueue::new()).compose(&scenario_payload());
        let names: Vec<String> = view
            .widgets
            .iter()
            .map(|w| serde_json::to_value(w).unwrap()["widget"].as_str().unwrap().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "navbar",
                "heading",
                "global_configurations",
                "player_manager",
                "dice_roll_container",
                "combat_container",
                "dice_list",
                "npc_container",
                "annotations",
                "general_dice_roll_modal",
                "dice_roll_result_modal",
                "toast_container",
            ]
        );
    }

    #[test]
    fn test_annotations_carry_note_value() {
        let mut payload = scenario_payload();
        payload.notes = Some(PlayerNote {
            player_id: "gm".into(),
            value: "Dragão no norte".to_string(),
        });

        let view = AdminPage::new(ToastQueue::new()).compose(&payload);

        assert_eq!(
            find(&view, "annotations"),
            Some(&Widget::Annotations {
                title: ANNOTATIONS_TITLE.to_string(),
                value: Some("Dragão no norte".to_string())
            })
        );
    }

    #[test]
    fn test_dice_result_lifecycle() {
        let mut page = AdminPage::new(ToastQueue::new());
        assert_eq!(page.dice_roll(), &DiceRollState::default());

        page.show_dice_result(vec![ResolvedDice::new(1, 20)], Some("fortitude".to_string()));
        let view = page.compose(&PageDataPayload::default());
        assert!(matches!(
            find(&view, "dice_roll_result_modal"),
            Some(Widget::DiceRollResultModal { show: true, .. })
        ));

        page.dismiss_dice_result();
        assert_eq!(page.dice_roll().dices, DiceRoll::Unresolved(String::new()));
        assert_eq!(page.dice_roll().resolver_key, Some(String::new()));

        let dismissed = serde_json::to_value(page.dice_roll()).unwrap();
        assert_eq!(dismissed, serde_json::json!({ "dices": "", "resolverKey": "" }));
    }

    #[test]
    fn test_general_dice_roll_modal_toggle() {
        let mut page = AdminPage::new(ToastQueue::new());
        page.open_general_dice_roll();
        let view = page.compose(&PageDataPayload::default());
        assert_eq!(
            find(&view, "general_dice_roll_modal"),
            Some(&Widget::GeneralDiceRollModal { show: true })
        );

        page.close_general_dice_roll();
        let view = page.compose(&PageDataPayload::default());
        assert_eq!(
            find(&view, "general_dice_roll_modal"),
            Some(&Widget::GeneralDiceRollModal { show: false })
        );
    }

    #[test]
    fn test_toasts_are_shared_and_not_deduplicated() {
        let toasts = ToastQueue::new();
        let page = AdminPage::new(toasts.clone());
        let context = page.context();

        context.add_toast(Toast::error("Falha ao salvar"));
        context.add_toast(Toast::error("Falha ao salvar"));

        assert_eq!(toasts.len(), 2);
        let view = page.compose(&PageDataPayload::default());
        match find(&view, "toast_container") {
            Some(Widget::ToastContainer { toasts }) => {
                assert_eq!(toasts.len(), 2);
                assert_eq!(toasts[0].kind, ToastKind::Error);
            }
            other => panic!("Expected toast container, got {:?}", other),
        }
    }

    #[test]
    fn test_emit_without_socket_is_a_no_op() {
        let page = AdminPage::new(ToastQueue::new());
        assert!(!page.context().emit("diceResult", serde_json::json!({})));
        assert!(page.context().socket().is_none());
    }
}
