//! The "carbon emissions and GDP decoupling" talk.

use super::spec::SlideSpec;

/// File the deck is written to, relative to the working directory.
pub const OUTPUT_FILE: &str = "Carbon_GDP_Presentation.pptx";

/// Title stored in the document properties.
pub const DECK_TITLE: &str = "碳排放驱动与 GDP 脱钩路径";

/// The eleven slides of the talk, in presentation order.
///
/// Pictures are looked up in the working directory; missing ones are skipped.
pub fn carbon_gdp_slides() -> Vec<SlideSpec> {
    vec![
        SlideSpec::title_slide(DECK_TITLE, "（汇报人：张成浩） — 简化版，便于宣讲")
            .with_image("image1.png")
            .with_note("开场：交代研究背景、目的与逻辑。今天重点讲清楚“为什么重要”和“我们能做什么”。"),
        SlideSpec::bullets(
            "目录",
            [
                "01 背景与核心问题",
                "02 理论工具（Kaya / LMDI / EKC）",
                "03 脱钩检验与主要发现",
                "04 政策建议与实践路径",
                "05 结论、AI 与专业反思",
            ],
        )
        .with_image("image2.png")
        .with_note("快速导航：告诉听众节奏与时间分配。"),
        SlideSpec::bullets(
            "背景与核心问题",
            [
                "全球与中国提出碳达峰、碳中和目标（2030/2060）",
                "问题：GDP 增长与碳排放能否脱钩？哪些因素驱动碳排放？",
                "我们关注：可操作的量化工具与政策路径",
            ],
        )
        .with_note("把长段文字压缩成 3 条要点，便于听众跟进。"),
        SlideSpec::bullets(
            "理论工具：Kaya 恒等式（简化）",
            [
                "CO2 = 人口 × 人均 GDP × 能源强度 × 单位能耗碳排放系数",
                "Kaya 把复杂问题分解为可量化的四个驱动项，方便政策针对性设计",
                "演讲提示：举例说明每一项如何被政策或技术影响",
            ],
        )
        .with_image("image3.png")
        .with_note("讲解公式并配合一个具体例子（如提高能效、替代能源减少 CO2/能耗系数）。"),
        SlideSpec::bullets(
            "方法快速说明：LMDI 与 EKC",
            [
                "LMDI：将排放变化分解为各驱动因素的贡献（无残差、可累加）",
                "EKC：环境库兹涅茨曲线，讨论经济增长与环境压力的关系形态",
                "本报告以 LMDI 分解为主，结合 EKC 的趋势解释",
            ],
        )
        .with_note("补充：LMDI 的优点是可量化每一项贡献，便于政策效果评估。"),
        SlideSpec::bullets(
            "脱钩检验：主要发现（示例）",
            [
                "总体上存在“相对脱钩”趋势，但地区与行业差异显著",
                "能效提升与能源结构改善为主要减排驱动力",
                "短期内 GDP 快速增长仍可能伴随排放增长，需结构性政策配合",
            ],
        )
        .with_note("此处把原始数据表格结论化，现场展示时只强调要点与一两组数据即可。"),
        SlideSpec::bullets(
            "区域与时段异质性",
            [
                "东部：能源强度下降快，脱钩进程相对领先",
                "中西部：产业结构调整与能源替代潜力大，但起点高",
                "十三五后：政策与技术推动结构性改善",
            ],
        )
        .with_note("如果需要，把某一张原始图表截图放在备注或现场展示板上。"),
        SlideSpec::bullets(
            "政策建议（精炼）",
            [
                "优化能源结构：加快清洁能源替代，重点在电力与重工业",
                "提升能效：推广技术改造与过程能耗管理",
                "区域协同：通过财政/市场手段引导产业转型",
                "公众与企业激励：绿色金融、碳市场、节能激励措施",
            ],
        )
        .with_note("每条建议配 1-2 个可落地的小措施（如碳预算试点、工业能效补贴）。"),
        SlideSpec::bullets(
            "面向节能减排，我们需要做（行动清单）",
            [
                "优化供给侧：发展低碳能源，减少化石能源依赖",
                "推动高质量发展：产业升级，降低能源密集型产出比重",
                "提升能效：建筑、交通、工业重点领域节能改造",
                "倡导绿色生活：节能习惯与消费选择",
            ],
        )
        .with_note("把公众能做的事情列出，便于演讲最后互动问答使用。"),
        SlideSpec::bullets(
            "AI 与专业、生活的辩证思考（简短）",
            [
                "发现：AI 提供强大分析/预测与自动化能力，但也可能增加能耗与伦理问题",
                "小建议（问题解决框架）：Identify -> Analyze -> Propose -> Monitor（示例：用 AI 优化电网调度、但同时监测算力能耗）",
                "提醒：技术是工具，政策与价值引导决定技术带来的社会后果",
            ],
        )
        .with_note("这一页讲两分钟：既肯定 AI 的价值，也提示它带来的新问题，并给出简单的落地思路。"),
        SlideSpec::bullets(
            "结论与致谢",
            [
                "结论：实现 GDP 与碳排放的稳定脱钩需要技术、结构与政策三管齐下",
                "建议重点：清洁能源、能效升级、区域协同与激励机制",
                "感谢聆听，欢迎提问",
            ],
        )
        .with_image("image1.png")
        .with_note("结束语：呼应开头目标，打开 Q&A。"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideBody;
    use std::path::PathBuf;

    #[test]
    fn test_deck_shape() {
        let slides = carbon_gdp_slides();
        assert_eq!(slides.len(), 11);
        assert!(slides[0].is_title_slide());
        assert!(slides[1..].iter().all(|s| !s.is_title_slide()));
        assert!(slides.iter().all(|s| s.speaker_note.is_some()));
    }

    #[test]
    fn test_images() {
        let images: Vec<(usize, PathBuf)> = carbon_gdp_slides()
            .into_iter()
            .enumerate()
            .filter_map(|(i, s)| s.image_path.map(|p| (i, p)))
            .collect();
        assert_eq!(
            images,
            vec![
                (0, PathBuf::from("image1.png")),
                (1, PathBuf::from("image2.png")),
                (3, PathBuf::from("image3.png")),
                (10, PathBuf::from("image1.png")),
            ]
        );
    }

    #[test]
    fn test_policy_slide_has_four_bullets() {
        let slides = carbon_gdp_slides();
        match &slides[7].body {
            SlideBody::Bullets(bullets) => {
                assert_eq!(bullets.len(), 4);
                assert!(bullets[0].starts_with("优化能源结构"));
            },
            other => panic!("unexpected body {:?}", other),
        }
    }
}
