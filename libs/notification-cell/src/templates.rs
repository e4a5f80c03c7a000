use chrono::{DateTime, Datelike, Timelike, Utc};

use shared_utils::clock::clinic_offset;

pub const CLINIC_NAME: &str = "Zoe Plasma Beauty";

const WEEKDAYS_ES: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Render a UTC instant as clinic-local Spanish text, e.g.
/// "lunes 16 de marzo de 2026, 14:30 hs".
pub fn format_appointment_date_es(instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&clinic_offset());
    let weekday = WEEKDAYS_ES[local.weekday().num_days_from_monday() as usize];
    let month = MONTHS_ES[local.month0() as usize];

    format!(
        "{} {} de {} de {}, {:02}:{:02} hs",
        weekday,
        local.day(),
        month,
        local.year(),
        local.hour(),
        local.minute()
    )
}

pub struct BookingEmailData {
    pub full_name: String,
    pub service_name: String,
    pub formatted_date: String,
    pub phone: String,
}

fn email_shell(body: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 500px; margin: 0 auto; color: #333;">
  <div style="text-align: center; border-bottom: 1px solid #eee; padding-bottom: 20px; margin-bottom: 20px;">
    <h1 style="color: #444; font-weight: 300; margin: 0;">Zoe Plasma <span style="font-weight: 600;">Beauty</span></h1>
  </div>
{body}
  <br>
  <p style="font-size: 13px; color: #888;">Atentamente,<br><strong>El equipo de {CLINIC_NAME}</strong></p>
</div>"#
    )
}

fn appointment_summary_block(data: &BookingEmailData) -> String {
    format!(
        r#"  <div style="background-color: #f9f9f9; border-left: 4px solid #444; padding: 15px; border-radius: 4px; margin: 25px 0;">
    <p style="margin: 0 0 5px 0; font-size: 13px; color: #666; text-transform: uppercase;">Tratamiento Seleccionado</p>
    <p style="margin: 0 0 15px 0; font-weight: bold; font-size: 16px;">{}</p>
    <p style="margin: 0 0 5px 0; font-size: 13px; color: #666; text-transform: uppercase;">Fecha y Hora (Local)</p>
    <p style="margin: 0; font-weight: bold; font-size: 16px; text-transform: capitalize;">{}</p>
  </div>"#,
        data.service_name, data.formatted_date
    )
}

/// Sent right after the reservation is written, before payment.
pub fn booking_received_html(data: &BookingEmailData) -> String {
    let body = format!(
        r#"  <h2 style="color: #444; font-weight: 300;">¡Hola, <strong>{}</strong>!</h2>
  <p style="line-height: 1.5;">Hemos recibido tu solicitud de evaluación exitosamente.</p>
{}
  <p style="line-height: 1.5;">Pronto nos pondremos en contacto contigo vía WhatsApp al número <strong>{}</strong> para confirmar los detalles finales y brindarte las indicaciones previas a tu cita.</p>"#,
        data.full_name,
        appointment_summary_block(data),
        data.phone
    );
    email_shell(&body)
}

/// Sent once the payment is verified and the appointment is confirmed.
pub fn booking_confirmation_html(data: &BookingEmailData) -> String {
    let body = format!(
        r#"  <h2 style="color: #444; font-weight: 300;">¡Hola, <strong>{}</strong>!</h2>
  <p style="line-height: 1.5;">Tu seña fue acreditada y tu turno quedó <strong>confirmado</strong>.</p>
{}
  <p style="line-height: 1.5;">Si necesitás reprogramar, escribinos por WhatsApp al número que registraste (<strong>{}</strong>) con al menos 24 horas de anticipación.</p>"#,
        data.full_name,
        appointment_summary_block(data),
        data.phone
    );
    email_shell(&body)
}
