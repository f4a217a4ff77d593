//! 首次启动时写入的默认内容。

use chrono::{DateTime, NaiveDate, Utc};

use crate::features::ai_resources::AiResource;
use crate::features::carousel::Carousel;
use crate::features::news::{NewsBoard, NewsItem, NewsSettings};
use crate::features::partners::Partner;
use crate::features::posts::Post;
use crate::features::profile::{CompanyInfo, CompanyIntro, FounderInfo};
use crate::features::services::{Service, TemplateType};

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn company() -> CompanyInfo {
    CompanyInfo {
        id: 1,
        name: "XUELONG AI".into(),
        subtitle: "雪珑人工智能设计工作室".into(),
        slogan: "引领智能工作新方式".into(),
        description: "专注于人工智能技术研发与应用的创新型工作室".into(),
        address: "北京市海淀区中关村科技园".into(),
        phone: "400-888-9999".into(),
        email: "contact@xuelongai.com".into(),
        updated_at: Utc::now(),
    }
}

pub fn founder() -> FounderInfo {
    FounderInfo {
        id: 1,
        name: "张雪珑".into(),
        title: "创始人 & 首席技术官".into(),
        description: "清华大学计算机科学博士，专注AI技术研发10余年，曾在顶级科技公司担任AI架构师，拥有多项AI专利。".into(),
        photo: "/founder-photo.svg".into(),
        updated_at: Utc::now(),
    }
}

pub fn intro() -> CompanyIntro {
    CompanyIntro {
        id: 1,
        paragraphs: strings(&[
            "雪珑AI工作室致力于推动人工智能技术的前沿发展，专注于机器学习、深度学习、自然语言处理等核心技术领域。我们以技术创新为驱动，为客户提供最前沿的AI解决方案，助力企业数字化转型和智能化升级。",
            "工作室汇聚了来自清华、北大、中科院等顶尖院校的AI专家，拥有深厚的理论基础和丰富的实践经验，致力于将最新的AI研究成果转化为实际应用。",
        ]),
        updated_at: Utc::now(),
    }
}

pub fn ai_resources() -> Vec<AiResource> {
    let rows: [(&str, &str, &str, &str); 6] = [
        ("ChatGPT", "智能对话助手，支持多轮对话和代码生成", "对话AI", "https://chat.openai.com"),
        ("Claude", "高质量文本分析和创作工具", "文本AI", "https://claude.ai"),
        ("Midjourney", "专业AI图像生成和艺术创作平台", "图像AI", "https://midjourney.com"),
        ("GitHub Copilot", "智能代码补全和编程助手", "编程AI", "https://github.com/features/copilot"),
        ("TensorFlow", "开源机器学习框架和模型训练", "开发框架", "https://tensorflow.org"),
        ("PyTorch", "深度学习研究和生产部署平台", "开发框架", "https://pytorch.org"),
    ];
    let now = Utc::now();
    rows.iter()
        .zip(1u64..)
        .map(|(&(name, description, category, url), id)| AiResource {
            id,
            name: name.into(),
            description: description.into(),
            category: category.into(),
            url: url.into(),
            is_active: true,
            created_at: now,
            updated_at: None,
        })
        .collect()
}

pub fn services() -> Vec<Service> {
    let rows: [(&str, &str, &str, [&str; 4]); 3] = [
        (
            "专业AI培训",
            "从基础到进阶，全面的人工智能课程体系",
            "Code",
            ["基础理论课程", "实战项目训练", "专家一对一指导", "就业推荐服务"],
        ),
        (
            "定制项目开发",
            "量身打造的AI解决方案，满足您的业务需求",
            "Monitor",
            ["需求分析", "方案设计", "开发实施", "部署维护"],
        ),
        (
            "校企合作",
            "与高等院校建立深度合作关系，共同推进AI人才培养",
            "Award",
            ["课程共建", "实习基地", "师资培训", "科研合作"],
        ),
    ];
    let now = Utc::now();
    rows.iter()
        .zip(1u64..)
        .map(|(&(title, description, icon, features), id)| Service {
            id,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            template_type: TemplateType::Vertical,
            features: strings(&features),
            poster_image: None,
            poster_images: Vec::new(),
            is_active: true,
            order: id as i64,
            created_at: now,
            updated_at: None,
        })
        .collect()
}

pub fn carousel() -> Carousel {
    let now = Utc::now();
    Carousel {
        id: 1,
        title: "核心服务轮播图片".into(),
        images: Vec::new(),
        is_active: true,
        auto_play: true,
        interval: 3000,
        created_at: now,
        updated_at: now,
    }
}

pub fn news() -> NewsBoard {
    let rows: [(&str, &str); 5] = [
        ("🎉 雪珑AI荣获2024年度最佳AI设计工作室奖", "award"),
        ("🚀 新推出智能UI设计助手，提升设计效率300%", "product"),
        ("💡 与知名企业达成战略合作，共建AI设计生态", "partnership"),
        ("🔥 AI培训课程火热报名中，限时优惠50%", "promotion"),
        ("⭐ 客户满意度达98%，服务质量行业领先", "achievement"),
    ];
    let now = Utc::now();
    NewsBoard {
        news: rows
            .iter()
            .zip(1u64..)
            .map(|(&(content, kind), id)| NewsItem {
                id,
                content: content.into(),
                icon: None,
                kind: kind.into(),
                priority: id as i64,
                is_active: true,
                created_at: now,
                updated_at: None,
            })
            .collect(),
        settings: NewsSettings::default(),
    }
}

pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "XUELONG AI 深度学习框架发布".into(),
            content: "我们很高兴地宣布XUELONG AI深度学习框架正式发布，为开发者提供更强大的AI开发工具。".into(),
            author: "XUELONG AI团队".into(),
            published: true,
            image: None,
            created_at: day(2024, 1, 15),
            updated_at: None,
        },
        Post {
            id: 2,
            title: "人工智能在医疗领域的突破性应用".into(),
            content: "XUELONG AI在医疗影像识别方面取得重大突破，准确率达到99.5%，为医疗诊断提供强有力支持。".into(),
            author: "研发部".into(),
            published: true,
            image: None,
            created_at: day(2024, 1, 10),
            updated_at: None,
        },
        Post {
            id: 3,
            title: "智能语音助手技术升级".into(),
            content: "最新版本的智能语音助手支持多语言识别和自然语言处理，用户体验显著提升。".into(),
            author: "产品团队".into(),
            published: true,
            image: None,
            created_at: day(2024, 1, 5),
            updated_at: None,
        },
    ]
}

pub fn partners() -> Vec<Partner> {
    let rows: [(&str, &str, &str); 6] = [
        ("清华大学", "人工智能研究合作伙伴", "https://www.tsinghua.edu.cn"),
        ("北京大学", "机器学习联合实验室", "https://www.pku.edu.cn"),
        ("中科院", "深度学习技术研发", "https://www.cas.cn"),
        ("华为技术", "5G+AI战略合作", "https://www.huawei.com"),
        ("腾讯云", "云计算服务提供商", "https://cloud.tencent.com"),
        ("阿里云", "AI算力支持合作", "https://www.aliyun.com"),
    ];
    rows.iter()
        .zip(1u64..)
        .map(|(&(name, description, website), id)| Partner {
            id,
            name: name.into(),
            description: description.into(),
            logo: None,
            website: website.into(),
            created_at: None,
            updated_at: None,
        })
        .collect()
}
