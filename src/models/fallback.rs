//! 内置示例语料
//!
//! 快照和源文档都不存在，或者转换失败且内存中没有任何语料时使用，
//! 保证上层服务始终有内容可读。

use crate::models::corpus::{Chapter, Corpus, QuizQuestion, Story, VocabEntry};

fn quiz(question: &str, options: [&str; 4], correct: usize) -> QuizQuestion {
    QuizQuestion {
        question: question.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct,
    }
}

fn vocab(word: &str, translation: &str, context: &str) -> VocabEntry {
    VocabEntry {
        word: word.to_string(),
        translation: translation.to_string(),
        context: context.to_string(),
    }
}

fn chapter(title: &str, content: &str, quiz: Vec<QuizQuestion>) -> Chapter {
    Chapter {
        title: title.to_string(),
        content: content.to_string(),
        quiz,
        vocabulary: Vec::new(),
    }
}

fn curupira() -> Story {
    let mut forest_guardian = chapter(
        "Chapter 1: The Forest Guardian",
        "Deep in the heart of the Amazon rainforest lives a mysterious creature known as Curupira. \
This legendary being has been protecting the forest for thousands of years. \
The Curupira appears as a small man with bright red hair and feet that point backward.\n\n\
The backward feet are not just a curious feature - they serve a very important purpose. \
When hunters try to track the Curupira, they follow his footprints in the wrong direction, \
getting lost deeper in the forest instead of finding him.\n\n\
Indigenous tribes have passed down stories of the Curupira from generation to generation. \
They say he appears to those who threaten the forest, leading them astray until they promise to respect nature.",
        vec![
            quiz(
                "What is the most distinctive feature of Curupira's feet?",
                ["They are very large", "They point backward", "They are golden", "They glow in the dark"],
                1,
            ),
            quiz(
                "Why does Curupira have backward feet?",
                ["To run faster", "To confuse hunters tracking him", "To climb trees better", "To swim in rivers"],
                1,
            ),
        ],
    );
    forest_guardian.vocabulary = vec![
        vocab("Forest", "floresta", "Deep in the heart of the Amazon rainforest lives a mysterious creature."),
        vocab("Creature", "criatura", "Deep in the heart of the Amazon rainforest lives a mysterious creature known as Curupira."),
        vocab("Protecting", "protegendo", "This legendary being has been protecting the forest for thousands of years."),
        vocab("Backward", "para trás", "The Curupira appears as a small man with bright red hair and feet that point backward."),
        vocab("Hunters", "caçadores", "When hunters try to track the Curupira, they follow his footprints in the wrong direction."),
    ];

    let lost_loggers = chapter(
        "Chapter 2: The Lost Loggers",
        "One day, a group of illegal loggers entered the sacred forest with their chainsaws and trucks. \
They planned to cut down the oldest trees to sell the valuable wood. But they did not know that the Curupira was watching.\n\n\
As soon as the loggers started their work, strange things began to happen. Their compasses spun wildly, pointing in all directions. \
The forest paths they had marked disappeared overnight.",
        vec![
            quiz(
                "What did the illegal loggers want to do in the forest?",
                ["Plant new trees", "Cut down old trees", "Study animals", "Build a camp"],
                1,
            ),
            quiz(
                "How did Curupira first appear to the loggers?",
                ["As a giant monster", "As a small lost boy", "As an angry warrior", "As a talking animal"],
                1,
            ),
        ],
    );

    let lesson_learned = chapter(
        "Chapter 3: The Lesson Learned",
        "For three days and nights, the loggers followed the small boy deeper into the forest. \
Every path he took led them in circles.\n\n\
\"I am Curupira, guardian of this forest,\" he said. \"I will show you the way out, but only if you promise never to harm any forest again.\"\n\n\
The loggers promised to change their ways, and they became forest protectors instead of destroyers.",
        vec![
            quiz(
                "How long were the loggers lost in the forest?",
                ["One day", "Two days", "Three days", "One week"],
                2,
            ),
            quiz(
                "What did the loggers promise to do?",
                ["Return with more equipment", "Never harm any forest again", "Tell no one about Curupira", "Pay money to the tribe"],
                1,
            ),
        ],
    );

    let mut story = Story::new(1, "The Legend of Curupira");
    story.chapters.insert(1, forest_guardian);
    story.chapters.insert(2, lost_loggers);
    story.chapters.insert(3, lesson_learned);
    story.total_chapters = 3;
    story
}

fn pink_dolphin() -> Story {
    let festival = chapter(
        "Chapter 1: The River Festival",
        "Every year, the village of Alter do Chão celebrates the Festival of the Waters. \
People from all along the Amazon River come to dance, sing, and celebrate the gifts of the river.\n\n\
As the music began on the first night, a handsome young man appeared at the edge of the dance area. \
He wore elegant clothes and a stylish hat, but no one in the village recognized him.",
        vec![
            quiz(
                "How often does the Festival of the Waters happen?",
                ["Every month", "Every year", "Every season", "Every week"],
                1,
            ),
            quiz(
                "What was Maria known for in the village?",
                ["Her cooking", "Her beautiful voice", "Her painting", "Her fishing skills"],
                1,
            ),
        ],
    );

    let dancer = chapter(
        "Chapter 2: The Mysterious Dancer",
        "The stranger approached Maria and asked her to dance. His movements were fluid like water. \
When dawn approached, the mysterious man said he had to leave. \
Maria noticed that he never removed his hat, even while dancing.",
        vec![
            quiz(
                "How did the stranger dance?",
                ["Clumsily", "Fluid like water", "Very fast", "Like a bird"],
                1,
            ),
            quiz(
                "What did Maria notice about the stranger?",
                ["He had warm skin", "He never removed his hat", "He wore no shoes", "He spoke strangely"],
                1,
            ),
        ],
    );

    let truth = chapter(
        "Chapter 3: The Truth Revealed",
        "In the moonlight, she noticed that his skin had a slight pink glow. \
As soon as the river reached his waist, his human form began to change. \
His arms became flippers, and his body transformed into that of a beautiful pink dolphin.",
        vec![
            quiz(
                "What did Maria notice about the stranger's skin?",
                ["It was very dry", "It had a slight pink glow", "It was covered in scales", "It was very dark"],
                1,
            ),
            quiz(
                "What happened to the stranger when he entered the river?",
                ["He swam away as a human", "He transformed into a pink dolphin", "He disappeared completely", "He called for help"],
                1,
            ),
        ],
    );

    let mut story = Story::new(2, "The Pink Dolphin's Secret");
    story.chapters.insert(1, festival);
    story.chapters.insert(2, dancer);
    story.chapters.insert(3, truth);
    story.total_chapters = 3;
    story
}

/// 构建内置示例语料
pub fn builtin_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    for story in [curupira(), pink_dolphin()] {
        corpus.stories.insert(story.id, story);
    }
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_is_valid() {
        let corpus = builtin_corpus();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.validate().is_ok());
        assert_eq!(corpus.quiz_count(), 12);
        assert!(corpus.chapter(1, 1).is_some_and(|c| !c.vocabulary.is_empty()));
        assert!(corpus.chapter(2, 1).is_some_and(|c| c.vocabulary.is_empty()));
    }
}
