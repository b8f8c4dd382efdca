/// Emotion picker catalog. The stored emotion field is the composite
/// `"<group> - <detail>"`.
pub struct EmotionGroup {
    pub group: &'static str,
    pub details: &'static [&'static str],
}

pub const EMOTION_GROUPS: [EmotionGroup; 3] = [
    EmotionGroup {
        group: "😀 긍정",
        details: &["기쁨", "감사", "자신감", "설렘", "평온"],
    },
    EmotionGroup {
        group: "😐 보통",
        details: &["그냥 그래요", "지루함"],
    },
    EmotionGroup {
        group: "😢 부정",
        details: &["슬픔", "불안", "짜증"],
    },
];

pub fn compose(group: &str, detail: &str) -> String {
    format!("{} - {}", group, detail)
}

pub fn is_known(group: &str, detail: &str) -> bool {
    EMOTION_GROUPS
        .iter()
        .any(|g| g.group == group && g.details.contains(&detail))
}
