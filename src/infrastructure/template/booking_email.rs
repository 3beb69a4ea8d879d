use crate::{
    constants::{SUBJECT_PREFIX, URGENT_MARKER},
    entities::{booking::BookingRequest, email::OutgoingEmail},
    utils::html::{escape_html, escape_multiline},
};

fn urgency_prefix(urgent: bool) -> &'static str {
    if urgent { URGENT_MARKER } else { "" }
}

/// Subject line for the notification. The name is escaped like the body.
pub fn booking_subject(booking: &BookingRequest) -> String {
    format!(
        "{}{}{}",
        urgency_prefix(booking.urgent),
        SUBJECT_PREFIX,
        escape_html(Some(booking.name.as_str()))
    )
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding:8px;border:1px solid #ddd;font-weight:bold;\">{label}</td>\
         <td style=\"padding:8px;border:1px solid #ddd;\">{value}</td></tr>"
    )
}

fn optional_row(label: &str, value: Option<&str>) -> String {
    value
        .map(|v| row(label, &escape_html(Some(v))))
        .unwrap_or_default()
}

/// Renders the fixed HTML layout. Rows for email, date and message are
/// left out of the markup entirely when the booking has no such value.
pub fn booking_html(booking: &BookingRequest) -> String {
    let message_row = booking
        .message
        .as_deref()
        .map(|m| row("Сообщение", &escape_multiline(Some(m))))
        .unwrap_or_default();

    format!(
        "<div style=\"font-family:Arial,sans-serif;max-width:600px;\">\
         <h2 style=\"color:{color};\">{prefix}Новая заявка на услугу</h2>\
         <table style=\"border-collapse:collapse;width:100%;\">\
         {name}{phone}{email}{service}{date}{message}{urgency}\
         </table></div>",
        color = if booking.urgent { "#d32f2f" } else { "#333" },
        prefix = urgency_prefix(booking.urgent),
        name = row("Имя", &escape_html(Some(booking.name.as_str()))),
        phone = row("Телефон", &escape_html(Some(booking.phone.as_str()))),
        email = optional_row("Email", booking.email.as_deref()),
        service = row("Услуга", &escape_html(Some(booking.service.as_str()))),
        date = optional_row("Желаемая дата", booking.date.as_deref()),
        message = message_row,
        urgency = row("Срочность", if booking.urgent { "Да" } else { "Нет" }),
    )
}

pub fn render_booking_email(booking: &BookingRequest, from: &str, to: &str) -> OutgoingEmail {
    OutgoingEmail {
        from: from.to_string(),
        to: vec![to.to_string()],
        subject: booking_subject(booking),
        html: booking_html(booking),
    }
}
