//! Static mock content
//!
//! Everything here is read-only and only exists to populate list views.

use serde::Serialize;

pub const MAX_INTERESTS: usize = 5;

/// Onboarding interests; a profile picks between one and `MAX_INTERESTS`.
pub const INTERESTS: [&str; 20] = [
    "Teknoloji",
    "Sanat",
    "Psikoloji",
    "Felsefe",
    "Müzik",
    "Edebiyat",
    "Bilim",
    "Tarih",
    "Seyahat",
    "Aşçılık",
    "Spor",
    "Girişimcilik",
    "Eğitim",
    "Doğa",
    "Film",
    "Yoga",
    "Meditasyon",
    "Yazılım",
    "Tasarım",
    "Fotograf",
];

/// Topic tags attached to a help request
pub const TOPIC_TAGS: [&str; 10] = [
    "Teknoloji",
    "Kariyer",
    "İlişkiler",
    "Sağlık",
    "Eğitim",
    "Finans",
    "Yaşam",
    "Hobi",
    "Seyahat",
    "Aile",
];

pub const MAX_QUESTION_CHARS: usize = 500;

pub const PHILOSOPHY_PAGES: [&str; 3] = [
    "Burada hız yok. Düşünce var.",
    "Kimliğin değil, niyetin önemli.",
    "Yardım et. Yardım al.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BottleMessage {
    pub id: u32,
    pub text: &'static str,
    pub tags: &'static [&'static str],
    pub time_ago: &'static str,
    pub distance: &'static str,
}

pub const BOTTLE_MESSAGES: [BottleMessage; 3] = [
    BottleMessage {
        id: 1,
        text: "Yazılım mühendisliğinden aşçılığa geçiş yapmayı düşünüyorum. Böyle radikal bir kariyer değişikliği yapan var mı?",
        tags: &["Kariyer", "Yaşam"],
        time_ago: "5dk önce",
        distance: "~120 km",
    },
    BottleMessage {
        id: 2,
        text: "İlişkimde sürekli aynı konuda tartışıyoruz. Nasıl kırılma noktasını bulabiliriz?",
        tags: &["İlişkiler"],
        time_ago: "12dk önce",
        distance: "~340 km",
    },
    BottleMessage {
        id: 3,
        text: "Yeni bir hobi edinmek istiyorum ama ne yapacağımı bilmiyorum. 30lu yaşlarda yeni başlamak için önerileriniz var mı?",
        tags: &["Hobi", "Yaşam"],
        time_ago: "18dk önce",
        distance: "~50 km",
    },
];

/// A help request waiting for someone to pick it up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub seed: i64,
    pub text: &'static str,
    pub tags: &'static [&'static str],
    pub time_ago: &'static str,
    pub distance: &'static str,
}

pub const WAITING_QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        seed: 3421,
        text: "Yazılım mühendisliğinden aşçılığa geçiş yapmayı düşünüyorum. Böyle radikal bir kariyer değişikliği yapan var mı?",
        tags: &["Kariyer", "Yaşam"],
        time_ago: "2dk önce",
        distance: "~120 km",
    },
    Question {
        id: 2,
        seed: 7892,
        text: "İlişkimde sürekli aynı konuda tartışıyoruz. Nasıl kırılma noktasını bulabiliriz?",
        tags: &["İlişkiler"],
        time_ago: "5dk önce",
        distance: "~340 km",
    },
    Question {
        id: 3,
        seed: 1256,
        text: "Yeni bir hobi edinmek istiyorum ama ne yapacağımı bilmiyorum. 30lu yaşlarda yeni başlamak için önerileriniz var mı?",
        tags: &["Hobi", "Yaşam"],
        time_ago: "12dk önce",
        distance: "~50 km",
    },
    Question {
        id: 4,
        seed: 9834,
        text: "Meditasyon ve mindfulness pratiği yapmak istiyorum ama zihin çok hareketli. Nereden başlamalıyım?",
        tags: &["Sağlık", "Yaşam"],
        time_ago: "18dk önce",
        distance: "~890 km",
    },
    Question {
        id: 5,
        seed: 4567,
        text: "Minimalist yaşam tarzına geçmek istiyorum. İlk adımlar neler olmalı?",
        tags: &["Yaşam"],
        time_ago: "25dk önce",
        distance: "~210 km",
    },
];

/// Someone in the human library with an unusual story to share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryPerson {
    pub id: u32,
    pub seed: i64,
    pub expertise: &'static str,
    pub bio: &'static str,
    pub available: bool,
}

pub const LIBRARY_PEOPLE: [LibraryPerson; 6] = [
    LibraryPerson {
        id: 1,
        seed: 7392,
        expertise: "Eski Tarikat Üyesi",
        bio: "Eski bir tarikat üyesiyim. Sor.",
        available: true,
    },
    LibraryPerson {
        id: 2,
        seed: 4821,
        expertise: "Profesyonel Dalgıç",
        bio: "15 yıldır derin denizlerde çalışıyorum. Korkularla yüzleşmek üzerine konuşabiliriz.",
        available: true,
    },
    LibraryPerson {
        id: 3,
        seed: 9156,
        expertise: "Minimalist Yaşam Koçu",
        bio: "Her şeyimi bırakıp 30 eşyayla yaşamaya başladım. Özgürleşme yolculuğu.",
        available: false,
    },
    LibraryPerson {
        id: 4,
        seed: 2847,
        expertise: "Eski Hapisane Müdürü",
        bio: "20 yıl hapishane sisteminde çalıştım. İnsan doğası üzerine çok şey öğrendim.",
        available: true,
    },
    LibraryPerson {
        id: 5,
        seed: 6193,
        expertise: "Kanser Survivor",
        bio: "3 kez kanser atlattım. Hayat, ölüm ve anlamlar üzerine konuşalım.",
        available: true,
    },
    LibraryPerson {
        id: 6,
        seed: 3728,
        expertise: "Dünya Gezgini",
        bio: "87 ülke gezdim. Kültür, yalnızlık ve keşif hakkında.",
        available: false,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardCategory {
    Light,
    Medium,
    Deep,
}

impl CardCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            CardCategory::Light => "Hafif",
            CardCategory::Medium => "Orta",
            CardCategory::Deep => "Derin",
        }
    }
}

/// A card from the "36 questions" deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionCard {
    pub category: CardCategory,
    pub question: &'static str,
}

pub const CONNECTION_CARDS: [ConnectionCard; 8] = [
    ConnectionCard {
        category: CardCategory::Light,
        question: "Dünyada herhangi birisiyle akşam yemeği yiyebilseydin, kim olurdu?",
    },
    ConnectionCard {
        category: CardCategory::Light,
        question: "Ünlü olmak ister miydin? Nasıl bir şekilde?",
    },
    ConnectionCard {
        category: CardCategory::Medium,
        question: "Telefon etmeden önce ne söyleyeceğini prova eder misin? Neden?",
    },
    ConnectionCard {
        category: CardCategory::Medium,
        question: "Senin için \"mükemmel\" bir gün nasıl olurdu?",
    },
    ConnectionCard {
        category: CardCategory::Medium,
        question: "En son ne zaman kendin için şarkı söyledin? Ya başkası için?",
    },
    ConnectionCard {
        category: CardCategory::Deep,
        question: "Eğer 90 yaşına kadar yaşayabilseydin ve son 60 yılını ya 30 yaşındaki zihinle ya da 30 yaşındaki bedenle geçirebilseydin, hangisini seçerdin?",
    },
    ConnectionCard {
        category: CardCategory::Deep,
        question: "Kendi ölümün hakkında gizli bir önsezin var mı?",
    },
    ConnectionCard {
        category: CardCategory::Deep,
        question: "Kendini tanımla ve partnerini tanımla. Sırayla 3 \"biz\" cümlesi kur. Örneğin, \"Biz ikimiz de bu odadayız ve...\"",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelMilestone {
    pub level: u8,
    pub title: &'static str,
    pub message: &'static str,
    pub description: &'static str,
}

pub const LEVEL_MILESTONES: [LevelMilestone; 4] = [
    LevelMilestone {
        level: 1,
        title: "El Sıkışma",
        message: "Bir şeyler değişti...",
        description: "Artık takma ad ve ülke bilgisini görebilirsin.",
    },
    LevelMilestone {
        level: 2,
        title: "Harita",
        message: "Biraz daha yaklaştınız.",
        description: "Şehir, yaş aralığı ve ilgi alanları artık görünür.",
    },
    LevelMilestone {
        level: 3,
        title: "Kişi",
        message: "Maskeler düşmeye başlıyor.",
        description: "Hobiler, kişilik özellikleri ve bulanık fotoğraf paylaşıldı.",
    },
    LevelMilestone {
        level: 4,
        title: "Gerçeklik",
        message: "Tam güven sağlandı.",
        description: "Tam profil görünümü aktif.",
    },
];

pub const PARTNER_GREETING: &str = "Merhaba! Sana nasıl yardımcı olabilirim?";

pub const PARTNER_REPLIES: [&str; 5] = [
    "Anlıyorum. Devam et, dinliyorum.",
    "Bu çok ilginç bir bakış açısı.",
    "Peki bu konuda ne hissediyorsun?",
    "Daha önce böyle bir durum yaşadın mı?",
    "Belki farklı bir açıdan bakabiliriz.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveChat {
    pub id: u32,
    pub preview: &'static str,
    pub last_message: &'static str,
}

impl ActiveChat {
    /// Avatar seed for the other side of this conversation
    pub fn seed(&self) -> i64 {
        self.id as i64 * 1000
    }
}

pub const ACTIVE_CHATS: [ActiveChat; 3] = [
    ActiveChat { id: 1, preview: "Kariyer değişikliği hakkında...", last_message: "2s önce" },
    ActiveChat { id: 2, preview: "Yeni bir hobi aramak...", last_message: "5dk önce" },
    ActiveChat { id: 3, preview: "İlişki sorunları...", last_message: "1s önce" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolvedQuestion {
    pub id: u32,
    pub topic: &'static str,
    pub title: &'static str,
    pub status: &'static str,
}

pub const SOLVED_QUESTIONS: [SolvedQuestion; 2] = [
    SolvedQuestion { id: 1, topic: "Teknoloji", title: "React öğrenme yolu", status: "Çözüldü" },
    SolvedQuestion { id: 2, topic: "Yaşam", title: "Sabah rutini oluşturma", status: "Çözüldü" },
];

pub fn bottle(id: u32) -> Option<&'static BottleMessage> {
    BOTTLE_MESSAGES.iter().find(|b| b.id == id)
}

pub fn waiting_question(id: u32) -> Option<&'static Question> {
    WAITING_QUESTIONS.iter().find(|q| q.id == id)
}

pub fn library_person(id: u32) -> Option<&'static LibraryPerson> {
    LIBRARY_PEOPLE.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let bottles: HashSet<u32> = BOTTLE_MESSAGES.iter().map(|b| b.id).collect();
        let questions: HashSet<u32> = WAITING_QUESTIONS.iter().map(|q| q.id).collect();
        let people: HashSet<u32> = LIBRARY_PEOPLE.iter().map(|p| p.id).collect();
        assert_eq!(bottles.len(), BOTTLE_MESSAGES.len());
        assert_eq!(questions.len(), WAITING_QUESTIONS.len());
        assert_eq!(people.len(), LIBRARY_PEOPLE.len());
    }

    #[test]
    fn test_lookups() {
        assert_eq!(bottle(2).map(|b| b.tags), Some(&["İlişkiler"][..]));
        assert_eq!(waiting_question(5).map(|q| q.seed), Some(4567));
        assert_eq!(library_person(3).map(|p| p.available), Some(false));
        assert!(bottle(99).is_none());
        assert!(waiting_question(0).is_none());
        assert!(library_person(7).is_none());
    }

    #[test]
    fn test_mock_tags_are_known_topics() {
        let tags = BOTTLE_MESSAGES
            .iter()
            .flat_map(|b| b.tags)
            .chain(WAITING_QUESTIONS.iter().flat_map(|q| q.tags));
        for tag in tags {
            assert!(TOPIC_TAGS.contains(tag), "{} is not a topic tag", tag);
        }
    }
}
