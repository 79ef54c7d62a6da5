//! The weekly income, expenses and balance bar chart.
//!
//! The chart options are generated as JSON for the ECharts library and
//! rendered next to a small script that initialises the chart. The script is
//! inlined in the page content so that it runs again whenever htmx swaps the
//! content in.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::summary::FinancialSummary;

/// The URL of the ECharts library.
pub const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The HTML element ID of the chart container.
pub const CHART_ID: &str = "weekly-chart";

const INCOME_COLOR: &str = "#4CAF50";
const EXPENSES_COLOR: &str = "#F44336";
const BALANCE_COLOR: &str = "#2196F3";

/// The label and values of one bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// The x axis labels and the three bar series for the weekly chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: [ChartSeries; 3],
}

impl ChartData {
    /// Derive the chart data from the weekly entries of `summary`.
    pub fn from_summary(summary: &FinancialSummary) -> Self {
        let weekly = &summary.weekly;

        let labels = weekly
            .iter()
            .map(|week| format!("Week {}", week.week))
            .collect();

        Self {
            labels,
            series: [
                ChartSeries {
                    name: "Income",
                    color: INCOME_COLOR,
                    values: weekly.iter().map(|week| week.income).collect(),
                },
                ChartSeries {
                    name: "Expenses",
                    color: EXPENSES_COLOR,
                    values: weekly.iter().map(|week| week.expenses).collect(),
                },
                ChartSeries {
                    name: "Balance",
                    color: BALANCE_COLOR,
                    values: weekly.iter().map(|week| week.balance).collect(),
                },
            ],
        }
    }
}

/// Build the ECharts bar chart for `summary`.
pub fn weekly_chart(summary: &FinancialSummary) -> Chart {
    let data = ChartData::from_summary(summary);

    let mut chart = Chart::new()
        .title(Title::new().text("Weekly overview"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(60)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(data.labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for series in data.series {
        chart = chart.series(
            Bar::new()
                .name(series.name)
                .item_style(ItemStyle::new().color(series.color))
                .data(series.values),
        );
    }

    chart
}

/// Render the chart container and the script that draws `summary` into it.
pub fn chart_view(summary: &FinancialSummary) -> Markup {
    let options = weekly_chart(summary).to_string();

    html!(
        section class="w-full mb-4"
        {
            div
                id=(CHART_ID)
                class="min-h-[380px] rounded dark:bg-gray-100"
            {}

            (chart_script(CHART_ID, &options))
        }
    )
}

fn chart_script(id: &str, options: &str) -> Markup {
    let script = format!(
        r#"(function() {{
            const chartDom = document.getElementById("{id}");
            echarts.getInstanceByDom(chartDom)?.dispose();
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#
    );

    html!(script { (PreEscaped(script)) })
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return currencyFormatter.format(number);",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        category::Category, earning::WeeklyEarning, summary::compute_summary,
        transaction::Transaction,
    };

    use super::{CHART_ID, ChartData, chart_view, weekly_chart};

    fn example_summary() -> crate::summary::FinancialSummary {
        let earnings = [WeeklyEarning {
            id: "e1".to_owned(),
            week_number: 1,
            gross_amount: 1000.0,
            start_date: date!(2024 - 01 - 01),
            end_date: date!(2024 - 01 - 07),
            description: "Salary".to_owned(),
        }];
        let transactions = [Transaction {
            id: "t1".to_owned(),
            date: date!(2024 - 01 - 03),
            amount: -50.0,
            description: "Cinema".to_owned(),
            category: Category::Leisure,
        }];

        compute_summary(&transactions, &earnings)
    }

    #[test]
    fn labels_every_week() {
        let data = ChartData::from_summary(&example_summary());

        assert_eq!(
            data.labels,
            vec!["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"]
        );
    }

    #[test]
    fn series_follow_weekly_entries() {
        let data = ChartData::from_summary(&example_summary());
        let [income, expenses, balance] = data.series;

        assert_eq!(income.name, "Income");
        assert_eq!(income.color, "#4CAF50");
        assert_eq!(income.values, vec![1000.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(expenses.name, "Expenses");
        assert_eq!(expenses.color, "#F44336");
        assert_eq!(expenses.values, vec![50.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(balance.name, "Balance");
        assert_eq!(balance.color, "#2196F3");
        assert_eq!(balance.values, vec![950.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn chart_options_contain_series_and_colors() {
        let options = weekly_chart(&example_summary()).to_string();

        for text in ["Week 1", "Income", "Expenses", "Balance", "#4CAF50", "#F44336", "#2196F3"] {
            assert!(options.contains(text), "missing {text} in {options}");
        }
    }

    #[test]
    fn chart_view_inlines_init_script() {
        let markup = chart_view(&example_summary()).into_string();
        let html = scraper::Html::parse_fragment(&markup);

        let container = scraper::Selector::parse(&format!("div#{CHART_ID}")).unwrap();
        assert_eq!(html.select(&container).count(), 1);

        let script = scraper::Selector::parse("script").unwrap();
        let script_text = html
            .select(&script)
            .next()
            .expect("could not find chart script")
            .inner_html();
        assert!(script_text.contains("echarts.init"));
        assert!(script_text.contains(CHART_ID));
    }
}
