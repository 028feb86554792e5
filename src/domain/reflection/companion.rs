//! Companion acknowledgements shown between an answer and the next question.

use serde::{Deserialize, Serialize};

use super::emotion::Emotion;
use super::question::Tier;
use crate::ports::{pick, RandomSource};

const WELCOME: &str = "欢迎来到心灵树洞 🌳\n\n这是一个安全、温暖的空间\n你可以放心地表达任何感受\n\n我会陪伴你，一起探索内心\n让我们开始吧...";

const IDENTIFICATION_POOL: &[&str] = &[
    "我听到你了，能够表达出来已经很好了",
    "谢谢你愿意和我分享你的感受",
    "我在这里陪着你，慢慢来",
    "你的感受是完全正常的，不用担心",
];

const ANXIETY_POOL: &[&str] = &[
    "我理解你的担心，让我们一起来看看",
    "焦虑是很常见的感觉，你不是一个人",
    "这种感觉一定不好受，我在这里陪你",
];

const SADNESS_POOL: &[&str] = &[
    "我能感受到你的难过，允许自己悲伤是可以的",
    "你经历了很多，这些感受都是真实的",
    "我会一直在这里，陪你度过这段时光",
];

const ANGER_POOL: &[&str] = &[
    "我理解你为什么会有这样的感受",
    "愤怒告诉我们有些事情需要改变",
    "让我们一起来看看如何处理这种感觉",
];

const FATIGUE_POOL: &[&str] = &[
    "听起来你真的需要好好休息一下了",
    "照顾好自己是最重要的",
    "你已经很努力了，值得好好放松",
];

const HAPPINESS_POOL: &[&str] = &[
    "这真是太好了！快乐的时刻值得珍惜",
    "你的快乐也感染了我",
    "让我们把这份美好保存下来",
];

const EXPLORATION_GENERIC_POOL: &[&str] = &[
    "谢谢你的分享",
    "我在认真倾听你说的每一句话",
    "继续说下去，我会陪着你",
];

const COPING_POOL: &[&str] = &[
    "让我们来想想如何让你感觉更好",
    "我有一些想法可能会帮到你",
    "一起来试试这些方法吧",
    "你觉得哪种方式比较适合你？",
];

const FAREWELL_POOL: &[&str] = &[
    "今天我们聊了很多，希望你感觉好一些了。记住，我随时都在这里",
    "你很勇敢，愿意面对和表达自己的感受。照顾好自己，好吗？",
    "每一天都是新的开始。相信你能够找到适合自己的方式",
    "谢谢你信任我，和我分享你的故事。祝你一切都好",
];

/// How the front end should present a companion message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PresentationTag {
    #[default]
    Neutral,
    Happy,
    Caring,
    Encouraging,
}

/// Short empathic acknowledgement. Not stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionMessage {
    pub text: String,
    /// Hint that the caller should speak the text aloud.
    pub should_voice: bool,
    pub presentation_tag: PresentationTag,
}

impl CompanionMessage {
    /// Creates a voiced message.
    pub fn voiced(text: impl Into<String>, presentation_tag: PresentationTag) -> Self {
        Self {
            text: text.into(),
            should_voice: true,
            presentation_tag,
        }
    }
}

/// Selects companion messages from fixed pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Fixed greeting shown once when a session opens.
    pub fn welcome(&self) -> CompanionMessage {
        CompanionMessage::voiced(WELCOME, PresentationTag::Caring)
    }

    /// Draws an acknowledgement for a turn that continues at `tier`.
    pub fn pick(&self, tier: Tier, emotion: Emotion, random: &mut dyn RandomSource) -> CompanionMessage {
        let tag = match tier {
            Tier::Identification | Tier::Exploration => PresentationTag::Caring,
            Tier::Coping => PresentationTag::Encouraging,
        };
        CompanionMessage::voiced(draw(Self::pool(tier, emotion), random), tag)
    }

    /// Draws a farewell for the turn that ends the session.
    pub fn closing(&self, random: &mut dyn RandomSource) -> CompanionMessage {
        CompanionMessage::voiced(draw(FAREWELL_POOL, random), PresentationTag::Happy)
    }

    /// Candidate texts for a tier and emotion.
    pub fn pool(tier: Tier, emotion: Emotion) -> &'static [&'static str] {
        match tier {
            Tier::Identification => IDENTIFICATION_POOL,
            Tier::Exploration => match emotion {
                Emotion::Anxiety => ANXIETY_POOL,
                Emotion::Sadness => SADNESS_POOL,
                Emotion::Anger => ANGER_POOL,
                Emotion::Fatigue => FATIGUE_POOL,
                Emotion::Happiness => HAPPINESS_POOL,
                Emotion::Calm | Emotion::Excited | Emotion::Hesitant | Emotion::Neutral => {
                    EXPLORATION_GENERIC_POOL
                }
            },
            Tier::Coping => COPING_POOL,
        }
    }

    /// Candidate farewell texts.
    pub fn farewell_pool() -> &'static [&'static str] {
        FAREWELL_POOL
    }
}

fn draw(pool: &'static [&'static str], random: &mut dyn RandomSource) -> &'static str {
    // Every pool above is a non-empty literal.
    pick(random, pool).copied().unwrap_or_default()
}
