//! Renders the budget page and the content partial that htmx swaps in.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    alert::Alert,
    category::Category,
    chart::{ECHARTS_URL, chart_view},
    earning::WEEK_NUMBERS,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, amount_color_class, base,
        format_currency, loading_spinner,
    },
    month::Month,
    session::{BudgetSession, Tab},
    summary::{MonthlySummary, WeeklySummary},
};

/// The ID of the element that holds the swappable page content.
pub(super) const CONTENT_ID: &str = "budget-content";

const CONTENT_TARGET: &str = "#budget-content";
const ALERT_TARGET: &str = "#alert-container";

const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

const TAB_ACTIVE_STYLE: &str = "px-4 py-2 rounded-t font-semibold text-white bg-blue-600";
const TAB_INACTIVE_STYLE: &str = "px-4 py-2 rounded-t text-gray-700 bg-gray-200 \
    hover:bg-gray-300 dark:text-gray-300 dark:bg-gray-700 dark:hover:bg-gray-600";

/// The full budget page.
///
/// `alert` is shown above the content, e.g. when the page was rendered with
/// stale data because the store could not be reached.
pub(super) fn budget_page(session: &BudgetSession, today: Date, alert: Option<Alert>) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="w-full mb-6"
            {
                h1 class="text-3xl font-bold" { "Monthly Budget" }
            }

            @if let Some(alert) = alert {
                div class="w-full" { (alert.into_markup()) }
            }

            div id=(CONTENT_ID) class="w-full"
            {
                (budget_content(session, today))
            }
        }
    };

    base(
        "Budget",
        &[HeadElement::ScriptLink(ECHARTS_URL.to_owned())],
        &content,
    )
}

/// The content of the page below the header.
pub(super) fn budget_content(session: &BudgetSession, today: Date) -> Markup {
    html! {
        (month_selector(session))

        h2 id="month-label" class="text-2xl font-semibold mb-4" { (session.month.label()) }

        section class="grid grid-cols-1 lg:grid-cols-3 gap-4 mb-6"
        {
            (monthly_card(&session.summary.monthly))

            div class="lg:col-span-2 grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-3 gap-4"
            {
                @for week in &session.summary.weekly {
                    (weekly_card(week))
                }
            }
        }

        section class={ (CARD_STYLE) " mb-6" }
        {
            (tab_bar(session.tab))

            @match session.tab {
                Tab::Transactions => { (transaction_form(default_expense_date(session.month, today))) }
                Tab::Earnings => { (earning_form(session.next_week_number)) }
            }
        }

        section class={ (CARD_STYLE) " mb-6" }
        {
            h2 class="text-xl font-bold mb-4" { "Weekly performance" }
            (chart_view(&session.summary))
        }

        section class="flex justify-end"
        {
            a
                href=(endpoints::format_export_endpoint(session.month))
                target="_blank"
                rel="noopener"
                class="px-4 py-2 text-white bg-green-600 hover:bg-green-700 rounded"
            {
                "Export report"
            }
        }
    }
}

/// The content partial followed by `alert`, swapped into the alert container out of band.
pub(super) fn budget_content_with_alert(
    session: &BudgetSession,
    today: Date,
    alert: Alert,
) -> Markup {
    html! {
        (budget_content(session, today))

        div id="alert-container" hx-swap-oob="innerHTML"
        {
            (alert.into_markup())
        }
    }
}

fn month_selector(session: &BudgetSession) -> Markup {
    html! {
        form
            hx-post=(endpoints::MONTH_API)
            hx-trigger="change"
            hx-target=(CONTENT_TARGET)
            hx-target-error=(ALERT_TARGET)
            hx-indicator="#indicator"
            class="flex items-center gap-4 mb-6"
        {
            label for="month" class=(FORM_LABEL_STYLE) { "Month" }

            input
                name="month"
                id="month"
                type="month"
                required
                value=(session.month)
                class={ (FORM_TEXT_INPUT_STYLE) " max-w-xs" };

            span id="indicator" class="htmx-indicator text-blue-600"
            {
                (loading_spinner())
                "Loading..."
            }
        }
    }
}

fn monthly_card(monthly: &MonthlySummary) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            h2 class="text-xl font-bold mb-2" { "Monthly summary" }

            (amount_rows(monthly.income, monthly.expenses, monthly.balance))

            h3 class="font-semibold mt-4 mb-2" { "Expenses by category" }

            @if monthly.categories.is_empty() {
                p class="text-sm text-gray-500 dark:text-gray-400" { "No expenses yet." }
            } @else {
                ul id="category-list" class="space-y-1 text-sm"
                {
                    @for (category, amount) in &monthly.categories {
                        (category_row(*category, *amount))
                    }
                }
            }
        }
    }
}

fn category_row(category: Category, amount: f64) -> Markup {
    html! {
        li class="flex justify-between"
        {
            span { (category.label()) }
            span { (format_currency(amount)) }
        }
    }
}

fn weekly_card(week: &WeeklySummary) -> Markup {
    // Weeks without an earning record are dimmed
    let style = if week.has_earnings() {
        CARD_STYLE.to_owned()
    } else {
        format!("{CARD_STYLE} opacity-60")
    };

    html! {
        div class=(style) data-week=(week.week)
        {
            h3 class="font-bold" { "Week " (week.week) }

            @if let (Some(start), Some(end)) = (week.start_date, week.end_date) {
                p class="date-range text-sm text-gray-500 dark:text-gray-400"
                {
                    (format_date(start)) " - " (format_date(end))
                }
            }

            (amount_rows(week.income, week.expenses, week.balance))
        }
    }
}

fn amount_rows(income: f64, expenses: f64, balance: f64) -> Markup {
    html! {
        dl class="grid grid-cols-2 gap-x-2 text-sm"
        {
            dt { "Income" }
            dd class="text-right text-green-600 dark:text-green-400" { (format_currency(income)) }

            dt { "Expenses" }
            dd class="text-right text-red-600 dark:text-red-400" { (format_currency(expenses)) }

            dt class="font-semibold" { "Balance" }
            dd class={ "text-right font-semibold " (amount_color_class(balance)) }
            {
                (format_currency(balance))
            }
        }
    }
}

fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn tab_bar(active: Tab) -> Markup {
    let tabs = [
        (Tab::Transactions, "transactions", "Expenses"),
        (Tab::Earnings, "earnings", "Earnings"),
    ];

    html! {
        nav class="flex gap-2 mb-4 border-b border-gray-200 dark:border-gray-700"
        {
            @for (tab, value, label) in tabs {
                button
                    type="button"
                    name="tab"
                    value=(value)
                    hx-post=(endpoints::TAB_API)
                    hx-target=(CONTENT_TARGET)
                    hx-target-error=(ALERT_TARGET)
                    aria-selected=(tab == active)
                    class=(if tab == active { TAB_ACTIVE_STYLE } else { TAB_INACTIVE_STYLE })
                {
                    (label)
                }
            }
        }
    }
}

/// Today if it falls in the selected month, otherwise the first day of that month.
fn default_expense_date(month: Month, today: Date) -> Date {
    if Month::containing(today) == month {
        today
    } else {
        month.first_day()
    }
}

fn transaction_form(default_date: Date) -> Markup {
    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target=(CONTENT_TARGET)
            hx-target-error=(ALERT_TARGET)
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "Add expense" }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(default_date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount (R$)" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for category in Category::ALL {
                        option
                            value=(category)
                            selected[category == Category::default()]
                        {
                            (category.label())
                        }
                    }
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save expense" }
        }
    }
}

fn earning_form(next_week_number: u8) -> Markup {
    html! {
        form
            id="earning-form"
            hx-post=(endpoints::EARNINGS_API)
            hx-target=(CONTENT_TARGET)
            hx-target-error=(ALERT_TARGET)
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "Add weekly earning" }

            div
            {
                label for="week_number" class=(FORM_LABEL_STYLE) { "Week" }

                select name="week_number" id="week_number" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for week in WEEK_NUMBERS {
                        option value=(week) selected[week == next_week_number]
                        {
                            "Week " (week)
                        }
                    }
                }
            }

            div class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                div
                {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Start date" }

                    input
                        name="start_date"
                        id="start_date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End date" }

                    input
                        name="end_date"
                        id="end_date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="gross_amount" class=(FORM_LABEL_STYLE) { "Gross amount (R$)" }

                input
                    name="gross_amount"
                    id="gross_amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="earning_description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="earning_description"
                    type="text"
                    placeholder="Description"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Save earning" }
        }
    }
}
