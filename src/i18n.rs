//! Message catalog for English, French and Arabic.
//!
//! Lookups are synchronous and allocation-free for plain keys. A key missing in
//! the requested locale falls back to English, then to the key itself, so an
//! untranslated message still renders as something a developer can grep for.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Locale {
    /// Accepts bare and region-tagged codes: `ar`, `ar-MA`, `fr_FR`, `EN`.
    pub fn parse(s: &str) -> Option<Self> {
        let lang = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Ar => "ar",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Ar => Direction::Rtl,
            Self::En | Self::Fr => Direction::Ltr,
        }
    }

    fn column(self) -> usize {
        match self {
            Self::En => 0,
            Self::Fr => 1,
            Self::Ar => 2,
        }
    }
}

// key, [en, fr, ar]
static CATALOG: &[(&str, [&str; 3])] = &[
    // notices
    ("notice.created", ["{entity} created", "{entity} : création réussie", "تم إنشاء {entity}"]),
    ("notice.updated", ["{entity} updated", "{entity} : mise à jour réussie", "تم تحديث {entity}"]),
    ("notice.deleted", ["{entity} deleted", "{entity} : suppression réussie", "تم حذف {entity}"]),
    ("notice.signedIn", ["Welcome back, {name}", "Bon retour, {name}", "مرحبا بعودتك، {name}"]),
    ("notice.signedOut", ["Signed out", "Déconnecté", "تم تسجيل الخروج"]),
    ("notice.memberAdded", ["Member added", "Membre ajouté", "تمت إضافة العضو"]),
    ("notice.memberRemoved", ["Member removed", "Membre retiré", "تمت إزالة العضو"]),
    ("notice.unchanged", ["Nothing to change", "Aucun changement", "لا يوجد تغيير"]),
    ("notice.marksSubmitted", ["{count} marks submitted", "{count} notes envoyées", "تم إرسال {count} علامات"]),
    ("notice.paymentRecorded", ["Payment recorded", "Paiement enregistré", "تم تسجيل الدفعة"]),
    // entities
    ("entity.student", ["Student", "Élève", "التلميذ"]),
    ("entity.teacher", ["Teacher", "Enseignant", "الأستاذ"]),
    ("entity.parent", ["Parent", "Parent", "ولي الأمر"]),
    ("entity.class", ["Class", "Classe", "القسم"]),
    ("entity.group", ["Group", "Groupe", "المجموعة"]),
    ("entity.mark", ["Mark", "Note", "العلامة"]),
    ("entity.payment", ["Payment", "Paiement", "الدفعة"]),
    ("entity.event", ["Event", "Événement", "الحدث"]),
    ("entity.message", ["Message", "Message", "الرسالة"]),
    // api errors
    ("error.unauthorized", [
        "Your session has expired. Please sign in again.",
        "Votre session a expiré. Veuillez vous reconnecter.",
        "انتهت صلاحية الجلسة. يرجى تسجيل الدخول مرة أخرى.",
    ]),
    ("error.forbidden", [
        "You do not have permission to do this.",
        "Vous n'avez pas la permission d'effectuer cette action.",
        "ليست لديك صلاحية للقيام بهذا الإجراء.",
    ]),
    ("error.notFound", [
        "The requested item was not found.",
        "L'élément demandé est introuvable.",
        "العنصر المطلوب غير موجود.",
    ]),
    ("error.server", [
        "The server ran into a problem. Please try again later.",
        "Le serveur a rencontré un problème. Veuillez réessayer plus tard.",
        "واجه الخادم مشكلة. يرجى المحاولة لاحقا.",
    ]),
    ("error.network", [
        "Could not reach the server. Check your connection.",
        "Impossible de joindre le serveur. Vérifiez votre connexion.",
        "تعذر الاتصال بالخادم. تحقق من اتصالك.",
    ]),
    ("error.unknown", [
        "Something went wrong.",
        "Une erreur est survenue.",
        "حدث خطأ ما.",
    ]),
    // validation
    ("validation.failed", [
        "Please correct the highlighted fields.",
        "Veuillez corriger les champs indiqués.",
        "يرجى تصحيح الحقول المحددة.",
    ]),
    ("validation.required", ["This field is required", "Ce champ est obligatoire", "هذا الحقل مطلوب"]),
    ("validation.tooLong", [
        "Must be at most {max} characters",
        "Doit contenir au plus {max} caractères",
        "يجب ألا يتجاوز {max} حرفا",
    ]),
    ("validation.tooShort", [
        "Must be at least {min} characters",
        "Doit contenir au moins {min} caractères",
        "يجب أن يحتوي على {min} أحرف على الأقل",
    ]),
    ("validation.invalidEmail", ["Invalid email address", "Adresse e-mail invalide", "بريد إلكتروني غير صالح"]),
    ("validation.outOfRange", [
        "Must be between {min} and {max}",
        "Doit être compris entre {min} et {max}",
        "يجب أن يكون بين {min} و {max}",
    ]),
    ("validation.negative", ["Must not be negative", "Ne doit pas être négatif", "يجب ألا يكون سالبا"]),
    ("validation.notPositive", ["Must be greater than zero", "Doit être supérieur à zéro", "يجب أن يكون أكبر من الصفر"]),
    ("validation.exceedsMax", [
        "Must not exceed {max}",
        "Ne doit pas dépasser {max}",
        "يجب ألا يتجاوز {max}",
    ]),
    ("validation.endBeforeStart", [
        "End must be after start",
        "La fin doit être postérieure au début",
        "يجب أن تكون النهاية بعد البداية",
    ]),
    ("validation.missingTarget", [
        "Choose a classroom or a group",
        "Choisissez une classe ou un groupe",
        "اختر قسما أو مجموعة",
    ]),
    ("validation.duplicate", ["Contains duplicates", "Contient des doublons", "يحتوي على عناصر مكررة"]),
    ("validation.overCapacity", [
        "More members than the group allows",
        "Plus de membres que le groupe n'en autorise",
        "عدد الأعضاء يتجاوز سعة المجموعة",
    ]),
    ("validation.empty", ["Add at least one entry", "Ajoutez au moins une entrée", "أضف عنصرا واحدا على الأقل"]),
];

/// Raw catalog lookup with English fallback.
pub fn t(locale: Locale, key: &str) -> &str {
    match CATALOG.iter().find(|(k, _)| *k == key) {
        Some((_, row)) => {
            let s = row[locale.column()];
            if s.is_empty() {
                row[0]
            } else {
                s
            }
        }
        None => key,
    }
}

/// Lookup plus `{name}` placeholder substitution.
pub fn render(locale: Locale, key: &str, args: &[(&str, String)]) -> String {
    let mut out = t(locale, key).to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_tagged_codes() {
        assert_eq!(Locale::parse("ar-MA"), Some(Locale::Ar));
        assert_eq!(Locale::parse("fr_FR"), Some(Locale::Fr));
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse("de"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Locale::Ar.direction(), Direction::Rtl);
        assert_eq!(Locale::Fr.direction(), Direction::Ltr);
    }

    #[test]
    fn render_substitutes_placeholders() {
        let entity = t(Locale::Fr, "entity.student").to_string();
        assert_eq!(
            render(Locale::Fr, "notice.created", &[("entity", entity)]),
            "Élève : création réussie"
        );
        assert_eq!(
            render(Locale::En, "validation.tooLong", &[("max", "120".into())]),
            "Must be at most 120 characters"
        );
    }

    #[test]
    fn unknown_keys_render_as_themselves() {
        assert_eq!(t(Locale::Ar, "no.such.key"), "no.such.key");
    }

    #[test]
    fn every_row_is_fully_translated() {
        for (key, row) in CATALOG {
            assert!(row.iter().all(|s| !s.is_empty()), "missing translation for {key}");
        }
    }
}
