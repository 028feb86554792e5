//! Closing guidance templates.
//!
//! Guidance is selected by emotion label alone. The response log is accepted
//! so the signature can grow, but its content never changes the text.

use super::emotion::Emotion;
use super::question::QuestionResponse;

const HEADER: &str = "✨ 给你的温馨建议：";

/// A fixed multi-section guidance text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceTemplate {
    pub affirmation: &'static str,
    pub suggestions_heading: &'static str,
    pub suggestions: &'static [&'static str],
    pub closing_affirmation: &'static str,
}

impl GuidanceTemplate {
    /// Renders header, affirmation, bullet list and closing line.
    pub fn render(&self) -> String {
        let mut lines = vec![
            HEADER.to_string(),
            String::new(),
            format!("🌸 {}", self.affirmation),
            String::new(),
            format!("💫 {}", self.suggestions_heading),
        ];
        lines.extend(self.suggestions.iter().map(|s| format!("• {}", s)));
        lines.push(String::new());
        lines.push(format!("🌈 {}", self.closing_affirmation));
        lines.join("\n")
    }
}

const TRY_THESE: &str = "试试这些方法：";

const ANXIETY: GuidanceTemplate = GuidanceTemplate {
    affirmation: "焦虑是我们身体的保护机制，它提醒我们关注重要的事情",
    suggestions_heading: TRY_THESE,
    suggestions: &[
        "每天练习5分钟深呼吸",
        "将担心的事情写下来",
        "专注于当下可以控制的事情",
        "适当运动，释放紧张情绪",
    ],
    closing_affirmation: "记住：你比想象中更有力量应对挑战",
};

const SADNESS: GuidanceTemplate = GuidanceTemplate {
    affirmation: "悲伤是疗愈过程的一部分，允许自己感受它",
    suggestions_heading: TRY_THESE,
    suggestions: &[
        "找信任的人倾诉",
        "写日记记录你的感受",
        "做一些让你感到舒适的事情",
        "保持规律的作息",
    ],
    closing_affirmation: "时间会帮助疗愈，而你并不孤单",
};

const ANGER: GuidanceTemplate = GuidanceTemplate {
    affirmation: "愤怒告诉我们，有些边界被侵犯了，这是正常的",
    suggestions_heading: TRY_THESE,
    suggestions: &[
        "暂停，深呼吸几次",
        "运动发泄情绪（跑步、打球）",
        "用\"我\"开头表达感受，而不是指责",
        "给自己时间冷静",
    ],
    closing_affirmation: "学会表达愤怒，而不是压抑或爆发",
};

const FATIGUE: GuidanceTemplate = GuidanceTemplate {
    affirmation: "你的身体在提醒你：是时候好好照顾自己了",
    suggestions_heading: TRY_THESE,
    suggestions: &[
        "保证充足的睡眠",
        "学会说\"不\"，设定界限",
        "做一些不费力的放松活动",
        "寻求他人的帮助和支持",
    ],
    closing_affirmation: "休息不是懒惰，而是为了更好地前行",
};

const HAPPINESS: GuidanceTemplate = GuidanceTemplate {
    affirmation: "美好的时刻值得记录和分享",
    suggestions_heading: TRY_THESE,
    suggestions: &[
        "写下这个快乐时刻",
        "和重要的人分享喜悦",
        "思考是什么带来了这份快乐",
        "计划更多类似的活动",
    ],
    closing_affirmation: "培养感恩的心，让快乐更持久",
};

const GENERIC: GuidanceTemplate = GuidanceTemplate {
    affirmation: "感谢你的信任和分享",
    suggestions_heading: "记住：",
    suggestions: &[
        "你的感受都是真实和有价值的",
        "寻求帮助是勇敢的表现",
        "每一天都是新的开始",
        "照顾好自己，你值得被爱",
    ],
    closing_affirmation: "愿你找到内心的平静与力量",
};

/// Produces the closing guidance for a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidanceGenerator;

impl GuidanceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Template used for `emotion`.
    pub fn template_for(emotion: Emotion) -> &'static GuidanceTemplate {
        match emotion {
            Emotion::Anxiety => &ANXIETY,
            Emotion::Sadness => &SADNESS,
            Emotion::Anger => &ANGER,
            Emotion::Fatigue => &FATIGUE,
            Emotion::Happiness => &HAPPINESS,
            Emotion::Calm | Emotion::Excited | Emotion::Hesitant | Emotion::Neutral => &GENERIC,
        }
    }

    /// Renders guidance for the session's final emotion.
    pub fn generate(&self, emotion: Emotion, _responses: &[QuestionResponse]) -> String {
        Self::template_for(emotion).render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::QuestionId;

    #[test]
    fn anxiety_guidance_has_affirmation_bullets_and_closing() {
        let text = GuidanceGenerator::new().generate(Emotion::Anxiety, &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[2], "🌸 焦虑是我们身体的保护机制，它提醒我们关注重要的事情");
        assert_eq!(lines[4], "💫 试试这些方法：");
        assert_eq!(lines[5], "• 每天练习5分钟深呼吸");
        assert_eq!(lines.last(), Some(&"🌈 记住：你比想象中更有力量应对挑战"));
    }

    #[test]
    fn every_template_has_three_or_four_suggestions() {
        for emotion in Emotion::all() {
            let n = GuidanceGenerator::template_for(*emotion).suggestions.len();
            assert!((3..=4).contains(&n), "{emotion}: {n}");
        }
    }

    #[test]
    fn heuristic_emotions_share_generic_template() {
        for emotion in [Emotion::Calm, Emotion::Excited, Emotion::Hesitant, Emotion::Neutral] {
            assert_eq!(GuidanceGenerator::template_for(emotion), &GENERIC);
        }
    }

    #[test]
    fn keyword_emotions_have_distinct_templates() {
        let rendered: std::collections::HashSet<String> = Emotion::keyword_driven()
            .iter()
            .map(|e| GuidanceGenerator::template_for(*e).render())
            .collect();
        assert_eq!(rendered.len(), 5);
    }

    #[test]
    fn output_ignores_response_content() {
        let generator = GuidanceGenerator::new();
        let responses = vec![
            QuestionResponse::new(QuestionId::new("e1").unwrap(), "充满活力和快乐"),
            QuestionResponse::new(QuestionId::new("c1_happy").unwrap(), "升职了"),
        ];
        assert_eq!(
            generator.generate(Emotion::Happiness, &[]),
            generator.generate(Emotion::Happiness, &responses)
        );
    }
}
