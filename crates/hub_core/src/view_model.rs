use crate::state::{AppState, DashboardScreen, Screen, SelectionScreen};
use crate::{Post, Route, SubredditGroup};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub route: Route,
    pub screen: ScreenView,
    pub signed_in_as: Option<String>,
    pub logout_pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Login(LoginView),
    Selection(SelectionView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub checking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub slots: Vec<SlotView>,
    pub focus: usize,
    pub submitting: bool,
    /// False while a submission is in flight.
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView {
    pub index: usize,
    pub label: String,
    pub value: String,
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub body: DashboardBody,
    /// "Back to selection" is always offered, whatever the load state.
    pub can_go_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardBody {
    Loading,
    Empty,
    Groups(Vec<GroupSection>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSection {
    pub subreddit: String,
    pub heading: String,
    pub error: Option<String>,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub score: String,
    pub comments: String,
    pub summary: String,
    pub author: String,
    pub url: String,
    pub selected: bool,
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let screen = match state.screen() {
        Screen::Login(login) => ScreenView::Login(LoginView {
            checking: login.probe.is_loading(),
        }),
        Screen::Selection(selection) => ScreenView::Selection(selection_view(selection)),
        Screen::Dashboard(dashboard) => ScreenView::Dashboard(dashboard_view(dashboard)),
    };
    AppViewModel {
        route: state.route(),
        screen,
        signed_in_as: state.signed_in_as().map(ToOwned::to_owned),
        logout_pending: state.logout_pending(),
    }
}

fn selection_view(screen: &SelectionScreen) -> SelectionView {
    let removable = screen.selection.slot_count() > 1;
    let slots = screen
        .selection
        .slots()
        .iter()
        .enumerate()
        .map(|(index, value)| SlotView {
            index,
            label: format!("Subreddit {}", index + 1),
            value: value.clone(),
            removable,
        })
        .collect();
    let submitting = screen.submit.is_loading();
    SelectionView {
        slots,
        focus: screen.focus,
        submitting,
        can_submit: !submitting,
    }
}

fn dashboard_view(screen: &DashboardScreen) -> DashboardView {
    let body = if screen.load.is_loading() {
        DashboardBody::Loading
    } else if screen.summaries.is_empty() {
        DashboardBody::Empty
    } else {
        let mut position = 0;
        let sections = screen
            .summaries
            .iter()
            .map(|group| group_section(group, screen.cursor, &mut position))
            .collect();
        DashboardBody::Groups(sections)
    };
    DashboardView {
        body,
        can_go_back: true,
    }
}

fn group_section(group: &SubredditGroup, cursor: usize, position: &mut usize) -> GroupSection {
    let posts = group
        .posts
        .iter()
        .map(|post| {
            let card = post_card(post, *position == cursor);
            *position += 1;
            card
        })
        .collect();
    GroupSection {
        subreddit: group.subreddit.clone(),
        heading: format!("r/{}", group.subreddit),
        error: group.error.clone(),
        posts,
    }
}

fn post_card(post: &Post, selected: bool) -> PostCard {
    PostCard {
        id: post.id.clone(),
        title: post.title.clone(),
        score: format_count(post.score),
        comments: format_count(i64::try_from(post.comments).unwrap_or(i64::MAX)),
        summary: post.summary.clone(),
        author: format!("by u/{}", post.author),
        url: post.url.clone(),
        selected,
    }
}

/// Formats an integer with thousands separators, e.g. `12,345`.
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.push('-');
    }
    out.chars().rev().collect()
}
