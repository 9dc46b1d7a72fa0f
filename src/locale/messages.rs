use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the form feedback is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Map a BCP 47 language tag onto a supported locale.
    ///
    /// Only the primary subtag is looked at; anything unknown yields `None`.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match primary.as_str() {
            "zh" => Some(Locale::ZhTw),
            "ja" | "jp" => Some(Locale::Ja),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::ZhTw => &ZH_TW,
            Locale::Ja => &JA,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// Message templates
// ============================================================================

/// How a field label is quoted in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `「label」必填`
    Bracketed,
    /// `label is required`
    Plain,
}

/// Per-locale text. Validation templates take the quoted label followed by
/// the suffix; `{n}`, `{max}` and `{len}` are substituted by [`Messages::render`].
#[derive(Debug)]
pub struct Messages {
    pub label_style: LabelStyle,
    pub required: &'static str,
    pub invalid_email: &'static str,
    pub too_short: &'static str,
    pub too_long: &'static str,
    pub submitting: &'static str,
    pub success: &'static str,
    pub failure: &'static str,
}

static ZH_TW: Messages = Messages {
    label_style: LabelStyle::Bracketed,
    required: "必填",
    invalid_email: "格式不正確",
    too_short: "至少 {n} 字",
    too_long: "最多 {max} 字（目前 {len} 字）",
    submitting: "提交中…",
    success: "感謝您的分享！已收到。\nID: {id}",
    failure: "提交失敗：{detail}",
};

static JA: Messages = Messages {
    label_style: LabelStyle::Bracketed,
    required: "は必須です",
    invalid_email: "の形式が正しくありません",
    too_short: "は{n}文字以上で入力してください",
    too_long: "は{max}文字以内で入力してください（現在{len}文字）",
    submitting: "送信中…",
    success: "ご共有ありがとうございます。受け付けました。\nID: {id}",
    failure: "送信に失敗しました：{detail}",
};

static EN: Messages = Messages {
    label_style: LabelStyle::Plain,
    required: "is required",
    invalid_email: "is not a valid email address",
    too_short: "must be at least {n} characters",
    too_long: "must be at most {max} characters (currently {len})",
    submitting: "Submitting…",
    success: "Thank you for sharing! We received it.\nID: {id}",
    failure: "Submission failed: {detail}",
};

impl Messages {
    /// Join a field label and a validation suffix in this locale's style.
    pub fn field_message(&self, label: &str, suffix: &str) -> String {
        match self.label_style {
            LabelStyle::Bracketed => format!("「{}」{}", label, suffix),
            LabelStyle::Plain => format!("{} {}", label, suffix),
        }
    }

    /// Substitute `{key}` placeholders in a template.
    pub fn render(template: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
    }

    pub fn success_message(&self, document_id: &str) -> String {
        Self::render(self.success, &[("id", document_id)])
    }

    pub fn failure_message(&self, detail: &str) -> String {
        Self::render(self.failure, &[("detail", detail)])
    }
}
