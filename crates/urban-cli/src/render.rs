use std::fmt::Write;
use urban_assistant::markup;
use urban_state::{AssistantPane, LoadStatus, Tab, ViewSnapshot};
use urban_types::{ChatMessage, MessageId, MessageKind, PointOfInterest};

/// Render the whole view as plain text.
pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();

    let status = if snapshot.connected {
        "connected"
    } else {
        "offline"
    };
    let _ = writeln!(
        out,
        "[tab: {}] [assistant: {}]{}",
        snapshot.active_tab,
        status,
        if snapshot.loading { " [thinking...]" } else { "" }
    );

    match snapshot.active_tab {
        Tab::Filters => render_filters(&mut out, snapshot),
        Tab::PointsOfInterest => render_points(&mut out, snapshot),
        Tab::Assistant => render_assistant(&mut out, snapshot),
        Tab::None => {}
    }

    if let Some(focus) = &snapshot.focus {
        let _ = writeln!(out, "\n== {} (panel {}px) ==", focus.point.title, snapshot.panel_width);
        render_point_details(&mut out, &focus.point);
    }

    if let Some(popup) = &snapshot.popup {
        let _ = writeln!(
            out,
            "\n[popup at ({:.0}, {:.0})] {}",
            popup.anchor.x, popup.anchor.y, popup.point.title
        );
        if let Some(score) = popup.point.score {
            let _ = writeln!(out, "  score {:.1}/5", score);
        }
        for reason in &popup.reasons {
            let _ = writeln!(out, "  • {}", reason);
        }
    }

    out
}

fn render_filters(out: &mut String, snapshot: &ViewSnapshot) {
    for (index, filter) in snapshot.filters.iter().enumerate() {
        let mark = if filter.enabled { "x" } else { " " };
        let _ = writeln!(out, "  {}. [{}] {}", index, mark, filter.label);
    }
    for layer in &snapshot.layers {
        let status = match layer.status {
            LoadStatus::Loading => "loading".to_string(),
            LoadStatus::Ready => format!("{} features", layer.features),
            LoadStatus::Unavailable => "unavailable".to_string(),
        };
        let _ = writeln!(out, "  layer {}: {}", layer.category, status);
    }
}

fn render_points(out: &mut String, snapshot: &ViewSnapshot) {
    if let Some(prompt) = &snapshot.recent_prompt {
        let _ = writeln!(out, "  Recent prompt: {}", prompt);
    }
    if snapshot.ai_points.is_empty() {
        let _ = writeln!(out, "  No recommended neighborhoods yet");
    }

    let focused = snapshot.focus.as_ref().map(|f| f.point.id.as_str());
    for point in &snapshot.ai_points {
        let marker = if Some(point.id.as_str()) == focused { ">" } else { " " };
        let score = point.score.map(|s| format!(" {:.1}/5", s)).unwrap_or_default();
        let _ = writeln!(out, " {} {}{} ({})", marker, point.title, score, point.id);
    }

    if !snapshot.recommendation_log.is_empty() {
        let _ = writeln!(
            out,
            "  {} recommendations this session",
            snapshot.recommendation_log.len()
        );
    }
}

fn render_assistant(out: &mut String, snapshot: &ViewSnapshot) {
    match snapshot.assistant_pane {
        AssistantPane::PromptSelector => render_prompt_selector(out, snapshot),
        AssistantPane::Chat => {
            for message in &snapshot.messages {
                render_message(out, message);
            }
            if !snapshot.input.is_empty() {
                let _ = writeln!(out, "  > {}", snapshot.input);
            }
        }
    }
}

fn render_prompt_selector(out: &mut String, snapshot: &ViewSnapshot) {
    match snapshot.catalogue {
        LoadStatus::Loading => {
            let _ = writeln!(out, "  Loading prompts...");
        }
        LoadStatus::Unavailable => {
            let _ = writeln!(out, "  Prompt catalogue unavailable");
        }
        LoadStatus::Ready => match &snapshot.selected_category {
            Some(category) => {
                let _ = writeln!(out, "  {}", category.name);
                for (index, prompt) in category.prompts.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", index, prompt);
                }
            }
            None => {
                for (index, category) in snapshot.categories.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {} - {}", index, category.name, category.description);
                }
            }
        },
    }
}

/// Render transcript entries newer than `last_seen` and return the newest id.
pub fn render_new_messages(
    out: &mut String,
    messages: &[ChatMessage],
    last_seen: MessageId,
) -> MessageId {
    let mut newest = last_seen;
    for message in messages.iter().filter(|m| m.id > last_seen) {
        render_message(out, message);
        newest = message.id;
    }
    newest
}

/// One transcript entry, markup rendered for assistant replies.
pub fn render_message(out: &mut String, message: &ChatMessage) {
    match message.kind {
        MessageKind::User => {
            let _ = writeln!(out, "you: {}", message.text);
        }
        MessageKind::Error => {
            let _ = writeln!(out, "error: {}", message.text);
        }
        MessageKind::Assistant => {
            let body = markup::render_text(&markup::parse(&message.text));
            let _ = writeln!(out, "assistant: {}", body);
            if let Some(percent) = message.confidence_percent() {
                let _ = writeln!(out, "  confidence {}%", percent);
            }
            for (index, rec) in message.recommendations.iter().enumerate() {
                let label = match &rec.neighborhood_id {
                    Some(id) if !id.as_str().is_empty() => format!("neighborhood {}", id),
                    _ => format!("recommendation {}", index + 1),
                };
                let _ = writeln!(out, "  -> {} (:goto {})", label, rec.point_id(index));
            }
        }
    }
}

fn render_point_details(out: &mut String, point: &PointOfInterest) {
    let _ = writeln!(out, "{}", point.description);
    let _ = writeln!(out, "at {:.4}, {:.4}", point.center.lat, point.center.lon);
    if let Some(score) = point.score {
        let _ = writeln!(out, "score {:.1}/5", score);
    }
    if let Some(density) = point.density_label() {
        let _ = writeln!(out, "density {}", density);
    }
    for reason in &point.reasons {
        let _ = writeln!(out, "  • {}", reason);
    }
}
