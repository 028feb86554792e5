//! Read-only question catalog.
//!
//! The bank is built once, validated, and shared behind an `Arc` by every
//! dialogue. Questions are grounded in CBT and positive-psychology practice:
//! identify the feeling, explore its cause, then try a coping step.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::emotion::Emotion;
use super::question::{Question, Tier};
use crate::domain::foundation::{QuestionId, ValidationError};
use crate::ports::{pick, RandomSource};

/// Number of identification questions a bank must carry.
pub const IDENTIFICATION_LEN: usize = 2;

/// Position of the identification question asked after the opening one.
pub const SECOND_IDENTIFICATION_INDEX: usize = 1;

static STANDARD_BANK: Lazy<Arc<QuestionBank>> = Lazy::new(|| Arc::new(QuestionBank::standard()));

/// Raw catalog sections, validated by [`QuestionBank::new`].
#[derive(Debug, Clone, Default)]
pub struct QuestionBankSections {
    pub identification: Vec<Question>,
    pub exploration: HashMap<Emotion, Vec<Question>>,
    pub generic_exploration: Vec<Question>,
    pub coping: HashMap<Emotion, Vec<Question>>,
    pub closing: Vec<Question>,
}

/// Immutable catalog of questions keyed by tier and emotion.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    identification: Vec<Question>,
    exploration: HashMap<Emotion, Vec<Question>>,
    generic_exploration: Vec<Question>,
    coping: HashMap<Emotion, Vec<Question>>,
    closing: Vec<Question>,
}

impl QuestionBank {
    /// Validates and freezes a catalog.
    ///
    /// # Errors
    ///
    /// - identification section does not hold exactly two questions
    /// - generic exploration pool is empty (it backs every tier-2 fallback)
    /// - a question sits in a section of a different tier
    /// - two questions share an id
    pub fn new(sections: QuestionBankSections) -> Result<Self, ValidationError> {
        let QuestionBankSections {
            identification,
            exploration,
            generic_exploration,
            coping,
            closing,
        } = sections;

        if identification.len() != IDENTIFICATION_LEN {
            return Err(ValidationError::out_of_range(
                "identification",
                IDENTIFICATION_LEN as i32,
                IDENTIFICATION_LEN as i32,
                identification.len() as i32,
            ));
        }
        if generic_exploration.is_empty() {
            return Err(ValidationError::empty_field("generic_exploration"));
        }

        check_tier("identification", &identification, Tier::Identification)?;
        check_tier("generic_exploration", &generic_exploration, Tier::Exploration)?;
        for questions in exploration.values() {
            check_tier("exploration", questions, Tier::Exploration)?;
        }
        for questions in coping.values() {
            check_tier("coping", questions, Tier::Coping)?;
        }
        check_tier("closing", &closing, Tier::Coping)?;

        let bank = Self {
            identification,
            exploration,
            generic_exploration,
            coping,
            closing,
        };

        check_unique_ids(&bank)?;
        Ok(bank)
    }

    /// Returns the process-wide standard catalog, built on first use.
    pub fn shared() -> Arc<QuestionBank> {
        Arc::clone(&STANDARD_BANK)
    }

    /// Builds the standard catalog.
    pub fn standard() -> Self {
        Self::new(standard_sections()).expect("standard question bank must be well-formed")
    }

    /// Entry question shown when a session starts.
    pub fn opening_question(&self) -> &Question {
        &self.identification[0]
    }

    /// Identification question asked after the opening one.
    pub fn second_identification(&self) -> &Question {
        &self.identification[SECOND_IDENTIFICATION_INDEX]
    }

    pub fn identification(&self) -> &[Question] {
        &self.identification
    }

    /// Emotion-specific exploration questions, empty when the emotion has none.
    pub fn exploration_for(&self, emotion: Emotion) -> &[Question] {
        self.exploration.get(&emotion).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn generic_exploration(&self) -> &[Question] {
        &self.generic_exploration
    }

    /// Emotion-specific coping questions, empty when the emotion has none.
    pub fn coping_for(&self, emotion: Emotion) -> &[Question] {
        self.coping.get(&emotion).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Wrap-up questions for an explicit closing mode. The automatic flow
    /// never asks these.
    pub fn closing(&self) -> &[Question] {
        &self.closing
    }

    /// Iterates every question in the catalog.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.identification
            .iter()
            .chain(self.exploration.values().flatten())
            .chain(self.generic_exploration.iter())
            .chain(self.coping.values().flatten())
            .chain(self.closing.iter())
    }

    /// Resolves a question id.
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions().find(|q| &q.id == id)
    }

    /// Next exploration question for `emotion`.
    ///
    /// Returns the first unanswered emotion-specific question. When the
    /// emotion has no list, or every entry is answered, draws uniformly from
    /// the generic pool.
    pub fn next_tier2(
        &self,
        emotion: Emotion,
        answered: &HashSet<QuestionId>,
        random: &mut dyn RandomSource,
    ) -> &Question {
        if let Some(question) = first_unanswered(self.exploration_for(emotion), answered) {
            return question;
        }
        tracing::debug!(%emotion, "no emotion-specific exploration left, using generic pool");
        pick(random, &self.generic_exploration).expect("generic pool is validated non-empty")
    }

    /// Next coping question for `emotion`, or `None` once exhausted.
    pub fn next_tier3(&self, emotion: Emotion, answered: &HashSet<QuestionId>) -> Option<&Question> {
        first_unanswered(self.coping_for(emotion), answered)
    }
}

fn first_unanswered<'a>(
    questions: &'a [Question],
    answered: &HashSet<QuestionId>,
) -> Option<&'a Question> {
    questions.iter().find(|q| !answered.contains(&q.id))
}

fn check_tier(section: &str, questions: &[Question], expected: Tier) -> Result<(), ValidationError> {
    match questions.iter().find(|q| q.tier != expected) {
        Some(q) => Err(ValidationError::invalid_format(
            section,
            format!("question '{}' is {}, expected {}", q.id, q.tier, expected),
        )),
        None => Ok(()),
    }
}

fn check_unique_ids(bank: &QuestionBank) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for question in bank.questions() {
        if !seen.insert(&question.id) {
            return Err(ValidationError::invalid_format(
                "question_bank",
                format!("duplicate id '{}'", question.id),
            ));
        }
    }
    Ok(())
}

fn qid(raw: &'static str) -> QuestionId {
    QuestionId::from_static(raw)
}

fn standard_sections() -> QuestionBankSections {
    const IDENTIFY: &str = "情绪识别";
    const EXPLORE: &str = "原因探索";
    const DEEP: &str = "深度探索";
    const COPE: &str = "应对策略";
    const CLOSE: &str = "总结";

    let identification = vec![
        Question::closed(
            qid("e1"),
            IDENTIFY,
            Tier::Identification,
            "此刻，你的心情是怎样的呢？",
            [
                "感到平静和放松",
                "有些焦虑不安",
                "感到悲伤或失落",
                "有些烦躁或生气",
                "感到疲惫无力",
                "充满活力和快乐",
            ],
        )
        .with_tags(["基础评估", "情绪状态"]),
        Question::closed(
            qid("e2"),
            IDENTIFY,
            Tier::Identification,
            "这种感觉持续多久了？",
            ["刚刚才开始", "几个小时", "一两天", "好几天了", "已经很长时间了"],
        )
        .with_tags(["时间评估", "情绪持续性"]),
    ];

    let exploration = HashMap::from([
        (
            Emotion::Anxiety,
            vec![
                Question::open(
                    qid("c1_anxiety"),
                    EXPLORE,
                    Tier::Exploration,
                    "是什么让你感到焦虑呢？可以跟我说说吗？",
                )
                .with_tags(["焦虑", "原因探索"]),
                Question::closed(
                    qid("c2_anxiety"),
                    EXPLORE,
                    Tier::Exploration,
                    "当焦虑出现时，你的身体有什么感觉吗？",
                    ["心跳加速", "呼吸急促", "手心出汗", "肌肉紧张", "头晕或头痛", "没有特别感觉"],
                )
                .with_tags(["焦虑", "身体感受"]),
            ],
        ),
        (
            Emotion::Sadness,
            vec![
                Question::open(
                    qid("c1_sadness"),
                    EXPLORE,
                    Tier::Exploration,
                    "能告诉我是什么让你感到难过吗？",
                )
                .with_tags(["悲伤", "原因探索"]),
                Question::open(
                    qid("c2_sadness"),
                    EXPLORE,
                    Tier::Exploration,
                    "在这种情况下，你最想要的是什么？",
                )
                .with_tags(["悲伤", "需求探索"]),
            ],
        ),
        (
            Emotion::Anger,
            vec![
                Question::open(
                    qid("c1_anger"),
                    EXPLORE,
                    Tier::Exploration,
                    "是什么触发了你的这种感觉？",
                )
                .with_tags(["愤怒", "触发因素"]),
                Question::open(
                    qid("c2_anger"),
                    EXPLORE,
                    Tier::Exploration,
                    "在这个情况中，你觉得什么是最不公平的？",
                )
                .with_tags(["愤怒", "公平感"]),
            ],
        ),
        (
            Emotion::Fatigue,
            vec![
                Question::open(
                    qid("c1_tired"),
                    EXPLORE,
                    Tier::Exploration,
                    "最近是什么消耗了你的精力？",
                )
                .with_tags(["疲惫", "能量消耗"]),
                Question::closed(
                    qid("c2_tired"),
                    EXPLORE,
                    Tier::Exploration,
                    "你最近有好好休息吗？",
                    ["睡眠充足", "睡眠不足", "睡眠质量不好", "很难入睡", "容易醒来"],
                )
                .with_tags(["疲惫", "睡眠质量"]),
            ],
        ),
        (
            Emotion::Happiness,
            vec![
                Question::open(
                    qid("c1_happy"),
                    EXPLORE,
                    Tier::Exploration,
                    "太好了！是什么让你感到快乐呢？",
                )
                .with_tags(["快乐", "积极事件"]),
                Question::open(
                    qid("c2_happy"),
                    EXPLORE,
                    Tier::Exploration,
                    "你想和谁分享这份快乐？",
                )
                .with_tags(["快乐", "社会支持"]),
            ],
        ),
    ]);

    let generic_exploration = vec![
        Question::open(
            qid("d1"),
            DEEP,
            Tier::Exploration,
            "这个情况让你想起过去的什么经历吗？",
        )
        .with_tags(["深度探索", "过往经历"]),
        Question::open(
            qid("d2"),
            DEEP,
            Tier::Exploration,
            "如果你的好朋友遇到同样的情况，你会对TA说什么？",
        )
        .with_tags(["深度探索", "自我关怀"]),
        Question::open(
            qid("d3"),
            DEEP,
            Tier::Exploration,
            "在这个情况中，有什么是你可以控制的吗？",
        )
        .with_tags(["深度探索", "控制感"]),
    ];

    let coping = HashMap::from([
        (
            Emotion::Anxiety,
            vec![
                Question::closed(
                    qid("s1_anxiety"),
                    COPE,
                    Tier::Coping,
                    "让我们一起做个深呼吸练习好吗？",
                    ["好的，开始吧", "稍后再做"],
                )
                .with_tags(["焦虑", "呼吸练习"]),
                Question::open(
                    qid("s2_anxiety"),
                    COPE,
                    Tier::Coping,
                    "以前遇到类似情况，什么方法帮助过你？",
                )
                .with_tags(["焦虑", "应对经验"]),
            ],
        ),
        (
            Emotion::Sadness,
            vec![
                Question::closed(
                    qid("s1_sadness"),
                    COPE,
                    Tier::Coping,
                    "现在有人可以陪伴你吗？",
                    ["有的", "暂时没有", "我想一个人待会儿"],
                )
                .with_tags(["悲伤", "社会支持"]),
                Question::open(
                    qid("s2_sadness"),
                    COPE,
                    Tier::Coping,
                    "想想看，有什么小事能让你感觉好一点？",
                )
                .with_tags(["悲伤", "积极行为"]),
            ],
        ),
        (
            Emotion::Anger,
            vec![Question::closed(
                qid("s1_anger"),
                COPE,
                Tier::Coping,
                "让我们暂停一下，你可以试着：",
                ["深呼吸几次", "离开现场冷静一下", "运动发泄情绪", "写下你的感受"],
            )
            .with_tags(["愤怒", "情绪管理"])],
        ),
        (
            Emotion::Fatigue,
            vec![Question::closed(
                qid("s1_tired"),
                COPE,
                Tier::Coping,
                "你觉得现在最需要的是：",
                ["好好睡一觉", "放松休息", "运动活动", "和朋友聊天", "独处静心"],
            )
            .with_tags(["疲惫", "恢复策略"])],
        ),
        (
            Emotion::Happiness,
            vec![Question::closed(
                qid("s1_happy"),
                COPE,
                Tier::Coping,
                "如何让这份快乐持续下去？",
                ["记录这个美好时刻", "分享给重要的人", "计划更多类似活动", "表达感恩"],
            )
            .with_tags(["快乐", "正向强化"])],
        ),
    ]);

    let closing = vec![
        Question::closed(
            qid("close1"),
            CLOSE,
            Tier::Coping,
            "现在的感觉比刚才好些了吗？",
            ["好多了", "稍微好一点", "差不多", "还是不太好"],
        )
        .with_tags(["评估", "结束"]),
        Question::open(
            qid("close2"),
            CLOSE,
            Tier::Coping,
            "今天我们的对话，有什么让你印象深刻的吗？",
        )
        .with_tags(["反思", "结束"]),
        Question::open(qid("close3"), CLOSE, Tier::Coping, "接下来你想做些什么呢？")
            .with_tags(["行动计划", "结束"]),
    ];

    QuestionBankSections {
        identification,
        exploration,
        generic_exploration,
        coping,
        closing,
    }
}
