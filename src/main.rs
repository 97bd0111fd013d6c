// ==========================================
// POS销售汇总引擎 - 命令行入口
// ==========================================
// 职责: 批处理驱动,供运维/脚本直接调用
// 用法:
//   pos-sales-engine <输入CSV> <输出CSV> [--filtered]
//   pos-sales-engine --augment <汇总CSV> <库存CSV> <输出CSV>
// ==========================================

use pos_sales_engine::{logging, ProcessApi};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", pos_sales_engine::APP_NAME, pos_sales_engine::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("处理失败: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let api = ProcessApi::default();

    match args {
        // 库存增强模式
        [flag, summary, stock, output] if flag == "--augment" => {
            let written =
                api.augment_with_stock(Path::new(summary), Path::new(stock), Path::new(output))?;
            tracing::info!("库存增强完成: {written} 条记录");
            Ok(())
        }

        // 汇总模式（可选 filtered 变体）
        [input, output] => {
            let report = api.process_summary(Path::new(input), Path::new(output))?;
            tracing::info!(
                "汇总完成: {} 行读入, {} 行跳过, {} 条记录写出",
                report.rows_total,
                report.rows_skipped,
                report.records_written
            );
            Ok(())
        }
        [input, output, flag] if flag == "--filtered" => {
            let report = api.process_filtered_summary(Path::new(input), Path::new(output))?;
            tracing::info!(
                "过滤汇总完成: {} 行读入, {} 行跳过, {} 条记录写出",
                report.rows_total,
                report.rows_skipped,
                report.records_written
            );
            Ok(())
        }

        _ => {
            eprintln!("用法:");
            eprintln!("  pos-sales-engine <输入CSV> <输出CSV> [--filtered]");
            eprintln!("  pos-sales-engine --augment <汇总CSV> <库存CSV> <输出CSV>");
            anyhow::bail!("参数无效")
        }
    }
}
