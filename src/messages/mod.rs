use chrono::{Datelike, NaiveDate};

use crate::location::LocationEntry;
use crate::types::{FastingEvent, Language};

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

pub fn format_date(lang: Language, date: NaiveDate) -> String {
    match lang {
        Language::Es => format!("{} de {}", date.day(), MONTHS_ES[date.month0() as usize]),
        Language::En => date.format("%B %-d").to_string(),
    }
}

fn notes_suffix(event: &FastingEvent) -> String {
    event
        .notes
        .as_ref()
        .map(|n| format!("\n\n📝 {}", n))
        .unwrap_or_default()
}

/// Sent the day before the fast.
pub fn reminder(lang: Language, event: &FastingEvent) -> String {
    let date = format_date(lang, event.fasting_date);
    match lang {
        Language::Es => format!(
            "🌙 Mañana es {}\n\n📅 {}\n\n🍽️ Paran: {} - {}{}\n\nHare Krishna! 🙏",
            event.name, date, event.paran_start, event.paran_end, notes_suffix(event)
        ),
        Language::En => format!(
            "🌙 Tomorrow is {}\n\n📅 {}\n\n🍽️ Paran: {} - {}{}\n\nHare Krishna! 🙏",
            event.name, date, event.paran_start, event.paran_end, notes_suffix(event)
        ),
    }
}

/// Sent on the morning the fast may be broken.
pub fn paran(lang: Language, event: &FastingEvent) -> String {
    let grains = if event.is_dvadasi {
        match lang {
            Language::Es => "\n\nHoy es Dvādaśī: rompe el ayuno con granos.",
            Language::En => "\n\nToday is Dvādaśī: break the fast with grains.",
        }
    } else {
        ""
    };
    match lang {
        Language::Es => format!(
            "🍽️ Paran - Ruptura de ayuno\n\n⏰ Hoy entre {} y {}{}\n\n¡Buen provecho! Hare Krishna 🙏",
            event.paran_start, event.paran_end, grains
        ),
        Language::En => format!(
            "🍽️ Paran - Break your fast\n\n⏰ Today between {} and {}{}\n\nEnjoy! Hare Krishna 🙏",
            event.paran_start, event.paran_end, grains
        ),
    }
}

pub fn welcome(lang: Language) -> String {
    match lang {
        Language::Es => "🙏 Hare Krishna!\n\nSoy el bot de recordatorios de Ekadasi.\n\n\
            Escribe tu ciudad o selecciona:\n\n\
            1️⃣ Ciudad de México\n2️⃣ Guadalajara\n3️⃣ Monterrey\n4️⃣ India (Vṛndāvan)\n\n\
            O escribe directamente: Lima, Bogotá, Madrid, etc.\n\n\
            Escribe /english para cambiar a inglés"
            .to_string(),
        Language::En => "🙏 Hare Krishna!\n\nI'm the Ekadasi reminder bot.\n\n\
            Type your city or select:\n\n\
            1️⃣ Mexico City\n2️⃣ Guadalajara\n3️⃣ Monterrey\n4️⃣ India (Vṛndāvan)\n\n\
            Or type directly: Lima, Bogotá, Madrid, etc.\n\n\
            Type /spanish to switch to Spanish"
            .to_string(),
    }
}

pub fn subscribed(lang: Language, location: &LocationEntry) -> String {
    let place = format!("{}, {}", location.display_name(lang), location.country_name(lang));
    match lang {
        Language::Es => format!(
            "✅ ¡Suscripción confirmada!\n\n📍 {}\n\n\
             Recibirás:\n• Recordatorio 1 día antes de Ekadasi\n• Horario de paran (ruptura de ayuno)\n\n{}\n\nHare Krishna! 🙏",
            place,
            commands(lang)
        ),
        Language::En => format!(
            "✅ Subscription confirmed!\n\n📍 {}\n\n\
             You'll receive:\n• Reminder 1 day before Ekadasi\n• Paran time (fast breaking)\n\n{}\n\nHare Krishna! 🙏",
            place,
            commands(lang)
        ),
    }
}

pub fn already_subscribed(lang: Language) -> String {
    match lang {
        Language::Es => format!(
            "🙏 Hare Krishna!\n\nYa estás suscrito.\n\n{}\n\nO escribe el nombre de tu ciudad para cambiar tu ubicación.",
            commands(lang)
        ),
        Language::En => format!(
            "🙏 Hare Krishna!\n\nYou're already subscribed.\n\n{}\n\nOr type your city name to change your location.",
            commands(lang)
        ),
    }
}

pub fn unsubscribed(lang: Language) -> String {
    match lang {
        Language::Es => "✅ Has cancelado tu suscripción. Ya no recibirás recordatorios.\n\n\
            Puedes volver a suscribirte en cualquier momento con /start"
            .to_string(),
        Language::En => "✅ You've unsubscribed. You won't receive any more reminders.\n\n\
            You can subscribe again anytime with /start"
            .to_string(),
    }
}

pub fn not_subscribed(lang: Language) -> String {
    match lang {
        Language::Es => "No tienes una suscripción activa. Escribe /start para comenzar.".to_string(),
        Language::En => "You don't have an active subscription. Type /start to begin.".to_string(),
    }
}

pub fn next_event(lang: Language, event: &FastingEvent) -> String {
    let title = match lang {
        Language::Es => "Próximo Ekadasi",
        Language::En => "Next Ekadasi",
    };
    format!(
        "🌙 {}\n\n📅 {}\n🗓️ {}\n\n🍽️ Paran ({}): {} - {}{}",
        title,
        event.name,
        format_date(lang, event.fasting_date),
        format_date(lang, event.paran_date),
        event.paran_start,
        event.paran_end,
        notes_suffix(event)
    )
}

pub fn no_events(lang: Language) -> String {
    match lang {
        Language::Es => "No hay información de próximos ekadasis. Por favor intenta más tarde.".to_string(),
        Language::En => "No upcoming ekadasi information available. Please try again later.".to_string(),
    }
}

pub fn language_changed(lang: Language) -> String {
    match lang {
        Language::Es => "🌐 Idioma cambiado a Español".to_string(),
        Language::En => "🌐 Language changed to English".to_string(),
    }
}

pub fn city_prompt(lang: Language) -> String {
    match lang {
        Language::Es => "📍 Escribe el nombre de tu ciudad para actualizar tu ubicación.".to_string(),
        Language::En => "📍 Type your city name to update your location.".to_string(),
    }
}

pub fn fasting_rules(lang: Language) -> String {
    match lang {
        Language::Es => "📜 Reglas de Ayuno - Ekādaśī\n\n\
            Alimentos RESTRINGIDOS en Ekādaśī:\n\
            • Granos (arroz, trigo, maíz, avena, etc.)\n\
            • Leguminosas (frijoles, lentejas, garbanzos)\n\
            • Vegetales de hoja (espinaca, lechuga, col)\n\
            • Tomates, berenjenas, coliflor, brócoli\n\
            • Especias como hing, comino, mostaza, cúrcuma\n\
            • Miel y aceites de granos\n\n\
            Alimentos PERMITIDOS:\n\
            • Frutas frescas y nueces\n\
            • Papas, pepino, calabaza, aguacate\n\
            • Productos lácteos puros\n\
            • Azúcar, sal, pimienta negra\n\
            • Aceites de nueces (coco, etc.)"
            .to_string(),
        Language::En => "📜 Fasting Rules - Ekādaśī\n\n\
            RESTRICTED foods on Ekādaśī:\n\
            • Grains (rice, wheat, corn, oats, etc.)\n\
            • Legumes (beans, lentils, chickpeas)\n\
            • Leafy vegetables (spinach, lettuce, cabbage)\n\
            • Tomatoes, eggplant, cauliflower, broccoli\n\
            • Spices like hing, cumin, mustard, turmeric\n\
            • Honey and grain oils\n\n\
            ALLOWED foods:\n\
            • Fresh fruits and nuts\n\
            • Potatoes, cucumber, squash, avocado\n\
            • Pure dairy products\n\
            • Sugar, salt, black pepper\n\
            • Nut oils (coconut, etc.)"
            .to_string(),
    }
}

pub fn commands(lang: Language) -> String {
    match lang {
        Language::Es => "Comandos:\n\
            /proximo - Ver próximo Ekadasi\n\
            /reglas - Ver reglas de ayuno\n\
            /ciudad - Cambiar ubicación\n\
            /stop - Cancelar suscripción"
            .to_string(),
        Language::En => "Commands:\n\
            /next - See next Ekadasi\n\
            /rules - View fasting rules\n\
            /city - Change location\n\
            /stop - Unsubscribe"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_per_language() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 26).unwrap();
        assert_eq!(format_date(Language::Es, date), "26 de diciembre");
        assert_eq!(format_date(Language::En, date), "December 26");
    }
}
